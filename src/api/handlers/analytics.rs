//! Analytics handlers: event recording and aggregation endpoints.

use axum::extract::{Query, State};
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    into_new_event, DayBucketDto, EventResponse, OverviewParams, OverviewResponse,
    RecordEventRequest, TimeseriesParams, TimeseriesResponse, TopJobDto, TopJobsParams,
    TopJobsResponse,
};
use crate::app_state::AppState;
use crate::auth::{AuthUser, MaybeAuthUser};
use crate::error::{ApiError, ErrorResponse};
use crate::service::analytics_service::Metric;

/// `POST /analytics/event` — Record one tracked event.
///
/// Anonymous callers are accepted; an authenticated caller's ID is
/// attached server-side.
///
/// # Errors
///
/// Returns [`ApiError`] on a blank event name.
#[utoipa::path(
    post,
    path = "/api/analytics/event",
    tag = "Analytics",
    summary = "Record an event",
    description = "Appends a tracked event. User agent and client IP default from the request when not supplied.",
    request_body = RecordEventRequest,
    responses(
        (status = 201, description = "Event recorded", body = EventResponse),
        (status = 400, description = "Missing event name", body = ErrorResponse),
    )
)]
pub async fn record_event(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    headers: HeaderMap,
    Json(req): Json<RecordEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_agent = header_string(&headers, USER_AGENT.as_str());
    let ip = header_string(&headers, "x-forwarded-for").map(|raw| first_forwarded_hop(&raw));
    let event = into_new_event(req, user.map(|u| u.id), user_agent, ip);
    let record = state.analytics_service.record_event(event).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(record))))
}

/// `GET /analytics/overview` — Headline metrics for a trailing window.
///
/// # Errors
///
/// Returns [`ApiError`] on query failure.
#[utoipa::path(
    get,
    path = "/api/analytics/overview",
    tag = "Analytics",
    summary = "Metrics overview",
    description = "Counts for the caller's scope over a trailing window: admins see everything, employers their own postings, jobseekers their own applications.",
    params(OverviewParams),
    responses(
        (status = 200, description = "Overview metrics", body = OverviewResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn overview(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<OverviewParams>,
) -> Result<impl IntoResponse, ApiError> {
    let overview = state
        .analytics_service
        .overview(&user, params.range.as_deref())
        .await?;
    Ok(Json(OverviewResponse::from(overview)))
}

/// `GET /analytics/timeseries` — Day-bucketed counts for one metric.
///
/// # Errors
///
/// Returns [`ApiError`] on an unknown metric.
#[utoipa::path(
    get,
    path = "/api/analytics/timeseries",
    tag = "Analytics",
    summary = "Metric timeseries",
    description = "Buckets the chosen metric by calendar day. Days without rows are omitted; buckets ascend by date.",
    params(TimeseriesParams),
    responses(
        (status = 200, description = "Day buckets", body = TimeseriesResponse),
        (status = 400, description = "Unknown metric", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn timeseries(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<TimeseriesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = params.metric.as_deref().unwrap_or("applications");
    let Some(metric) = Metric::parse(raw) else {
        return Err(ApiError::validation("Invalid metric"));
    };
    let (rows, range_days) = state
        .analytics_service
        .timeseries(&user, metric, params.range.as_deref())
        .await?;
    Ok(Json(TimeseriesResponse {
        success: true,
        metric: metric.as_str().to_string(),
        range_days,
        series: rows.into_iter().map(DayBucketDto::from).collect(),
    }))
}

/// `GET /analytics/top-jobs` — Jobs ranked by application count.
///
/// # Errors
///
/// Returns [`ApiError`] on query failure.
#[utoipa::path(
    get,
    path = "/api/analytics/top-jobs",
    tag = "Analytics",
    summary = "Top jobs by applications",
    description = "Ranks jobs by all-time application count. Employers see only their own postings; the limit is clamped to 1..=50.",
    params(TopJobsParams),
    responses(
        (status = 200, description = "Ranked jobs", body = TopJobsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn top_jobs(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<TopJobsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state.analytics_service.top_jobs(&user, params.limit).await?;
    Ok(Json(TopJobsResponse {
        success: true,
        items: rows.into_iter().map(TopJobDto::from).collect(),
    }))
}

/// The client address is the first hop of a comma-separated
/// `X-Forwarded-For` chain.
fn first_forwarded_hop(raw: &str) -> String {
    raw.split(',').next().unwrap_or(raw).trim().to_string()
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Analytics routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/event", post(record_event))
        .route("/analytics/overview", get(overview))
        .route("/analytics/timeseries", get(timeseries))
        .route("/analytics/top-jobs", get(top_jobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn header_string_reads_present_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("test-agent/1.0"));
        assert_eq!(
            header_string(&headers, USER_AGENT.as_str()),
            Some("test-agent/1.0".to_string())
        );
        assert_eq!(header_string(&headers, "x-forwarded-for"), None);
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        assert_eq!(first_forwarded_hop("203.0.113.7, 10.0.0.1"), "203.0.113.7");
        assert_eq!(first_forwarded_hop("198.51.100.2"), "198.51.100.2");
    }
}
