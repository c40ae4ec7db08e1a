//! Application workflow handlers: apply, list, and status review.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::dto::{
    ApplicationDto, ApplicationResponse, ApplyRequest, PageParams, PageResponse,
    UpdateStatusRequest,
};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::{ApplicationId, ApplicationStatus, JobId};
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::models::ApplicationListRow;

/// Status filter accepted by the application list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StatusFilterParams {
    /// Review status, lowercase wire form.
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusFilterParams {
    /// Parses the filter, rejecting values outside the status set.
    fn parse(&self) -> Result<Option<ApplicationStatus>, ApiError> {
        match self.status.as_deref() {
            None => Ok(None),
            Some(raw) => ApplicationStatus::parse(raw)
                .map(Some)
                .ok_or_else(|| ApiError::validation("Invalid status")),
        }
    }
}

/// `POST /applications/{job_id}/apply` — Submit an application.
///
/// # Errors
///
/// Returns [`ApiError`] on a missing resume, an inactive job, or a
/// duplicate application.
#[utoipa::path(
    post,
    path = "/api/applications/{job_id}/apply",
    tag = "Applications",
    summary = "Apply to a job",
    description = "Submits one application per user per job. The target posting must be active and a resume URL is required.",
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Missing resume or inactive job", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 409, description = "Already applied", body = ErrorResponse),
    )
)]
pub async fn apply(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(job_id): Path<JobId>,
    Json(req): Json<ApplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let application = state
        .application_service
        .apply(&user, job_id, req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

/// `GET /applications/my` — The caller's own applications.
///
/// # Errors
///
/// Returns [`ApiError`] on an invalid status filter.
#[utoipa::path(
    get,
    path = "/api/applications/my",
    tag = "Applications",
    summary = "List my applications",
    description = "Returns the caller's applications, newest first, each joined with a job summary.",
    params(PageParams, StatusFilterParams),
    responses(
        (status = 200, description = "Page of applications", body = PageResponse<ApplicationDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_my_applications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(page): Query<PageParams>,
    Query(filter): Query<StatusFilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = page.clamped();
    let status = filter.parse()?;
    let (rows, total) = state
        .application_service
        .list_for_applicant(&user, status, page.limit, page.offset())
        .await?;
    Ok(Json(page_of(rows, total, page)))
}

/// `GET /applications/job/{job_id}` — Applications for one posting.
///
/// # Errors
///
/// Returns [`ApiError`] when the job does not exist or the actor may
/// not review it.
#[utoipa::path(
    get,
    path = "/api/applications/job/{job_id}",
    tag = "Applications",
    summary = "List applications for a job",
    description = "Visible to the owning employer and admins only.",
    params(PageParams, StatusFilterParams),
    responses(
        (status = 200, description = "Page of applications", body = PageResponse<ApplicationDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the posting owner", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
    )
)]
pub async fn list_job_applications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(job_id): Path<JobId>,
    Query(page): Query<PageParams>,
    Query(filter): Query<StatusFilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = page.clamped();
    let status = filter.parse()?;
    let (rows, total) = state
        .application_service
        .list_for_job(job_id, &user, status, page.limit, page.offset())
        .await?;
    Ok(Json(page_of(rows, total, page)))
}

/// `GET /applications/employer` — Applications across all of the
/// caller's postings.
///
/// # Errors
///
/// Returns [`ApiError`] on an invalid status filter.
#[utoipa::path(
    get,
    path = "/api/applications/employer",
    tag = "Applications",
    summary = "List applications to my postings",
    description = "Returns applications against every posting the caller owns, each joined with applicant details.",
    params(PageParams, StatusFilterParams),
    responses(
        (status = 200, description = "Page of applications", body = PageResponse<ApplicationDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_employer_applications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(page): Query<PageParams>,
    Query(filter): Query<StatusFilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = page.clamped();
    let status = filter.parse()?;
    let (rows, total) = state
        .application_service
        .list_for_employer(&user, status, page.limit, page.offset())
        .await?;
    Ok(Json(page_of(rows, total, page)))
}

/// `PATCH /applications/{id}/status` — Review an application.
///
/// # Errors
///
/// Returns [`ApiError`] on an unknown status, a missing application,
/// or an actor who may not review it.
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    tag = "Applications",
    summary = "Update application status",
    description = "Moves an application to any status in the set. Every non-pending status re-stamps the review time.",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponse),
        (status = 400, description = "Invalid status value", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the posting owner", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse),
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<ApplicationId>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let application = state
        .application_service
        .update_status(id, &user, &req.status, req.notes)
        .await?;
    Ok(Json(ApplicationResponse::from(application)))
}

fn page_of(
    rows: Vec<ApplicationListRow>,
    total: i64,
    page: PageParams,
) -> PageResponse<ApplicationDto> {
    let items: Vec<ApplicationDto> = rows.into_iter().map(ApplicationDto::from).collect();
    PageResponse::new(items, total, page)
}

/// Application routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/applications/{job_id}/apply", post(apply))
        .route("/applications/my", get(list_my_applications))
        .route("/applications/job/{job_id}", get(list_job_applications))
        .route("/applications/employer", get(list_employer_applications))
        .route("/applications/{id}/status", patch(update_status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::panic)]
    fn status_filter_accepts_known_values() {
        let params = StatusFilterParams {
            status: Some("shortlisted".to_string()),
        };
        let Ok(parsed) = params.parse() else {
            panic!("known status must parse")
        };
        assert_eq!(parsed, Some(ApplicationStatus::Shortlisted));
    }

    #[test]
    fn status_filter_rejects_unknown_values() {
        let params = StatusFilterParams {
            status: Some("archived".to_string()),
        };
        assert!(params.parse().is_err());
    }

    #[test]
    #[allow(clippy::panic)]
    fn absent_status_filter_means_no_filter() {
        let Ok(parsed) = StatusFilterParams::default().parse() else {
            panic!("absent status must parse")
        };
        assert_eq!(parsed, None);
    }
}
