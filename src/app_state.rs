//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{
    AnalyticsService, ApplicationService, AuthService, JobService, SavedJobService,
};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration, login, and profile management.
    pub auth_service: Arc<AuthService>,
    /// Job catalog operations.
    pub job_service: Arc<JobService>,
    /// Application submission and review workflow.
    pub application_service: Arc<ApplicationService>,
    /// Saved-job bookkeeping.
    pub saved_job_service: Arc<SavedJobService>,
    /// Event recording and aggregations.
    pub analytics_service: Arc<AnalyticsService>,
}
