//! jobboard-api server entry point.
//!
//! Starts the Axum HTTP server over a PostgreSQL pool, running pending
//! migrations first.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use jobboard_api::api;
use jobboard_api::app_state::AppState;
use jobboard_api::auth::TokenService;
use jobboard_api::config::AppConfig;
use jobboard_api::persistence::{
    AnalyticsStore, ApplicationStore, JobStore, SavedJobStore, UserStore,
};
use jobboard_api::service::{
    AnalyticsService, ApplicationService, AuthService, JobService, SavedJobService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting jobboard-api");

    // Connect and migrate
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database ready");

    // Build persistence layer
    let users = UserStore::new(pool.clone());
    let jobs = JobStore::new(pool.clone());
    let applications = ApplicationStore::new(pool.clone());
    let saved = SavedJobStore::new(pool.clone());
    let analytics = AnalyticsStore::new(pool);

    // Build service layer
    let tokens = TokenService::new(&config.jwt_secret, config.jwt_ttl_hours);
    let auth_service = Arc::new(AuthService::new(users, tokens, config.bcrypt_cost));
    let job_service = Arc::new(JobService::new(jobs.clone()));
    let application_service = Arc::new(ApplicationService::new(applications, jobs.clone()));
    let saved_job_service = Arc::new(SavedJobService::new(saved, jobs));
    let analytics_service = Arc::new(AnalyticsService::new(analytics));

    // Build application state
    let app_state = AppState {
        auth_service,
        job_service,
        application_service,
        saved_job_service,
        analytics_service,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
