//! Job catalog handlers: create, list, get, update, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    AckResponse, CreateJobRequest, JobDto, JobListParams, JobResponse, PageParams, PageResponse,
    UpdateJobRequest,
};
use crate::app_state::AppState;
use crate::auth::{AuthUser, MaybeAuthUser};
use crate::domain::{JobId, JobSort};
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::JobFilter;
use crate::service::job_service::JobListRequest;

/// `POST /jobs` — Create a posting.
///
/// # Errors
///
/// Returns [`ApiError`] when the actor cannot post jobs or required
/// fields are blank.
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "Jobs",
    summary = "Create a job posting",
    description = "Creates an active posting owned by the authenticated employer. Jobseekers cannot post.",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Posting created", body = JobResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Role cannot post jobs", body = ErrorResponse),
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new = req.into_new_job(user.id);
    let job = state.job_service.create_job(&user, new).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

/// `GET /jobs` — List postings with filters, sort, and pagination.
///
/// # Errors
///
/// Returns [`ApiError`] on query failure.
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Jobs",
    summary = "List job postings",
    description = "Anonymous callers see active postings. `myJobs=true` lets an authenticated employer list their own postings across all statuses.",
    params(PageParams, JobListParams),
    responses(
        (status = 200, description = "Page of postings", body = PageResponse<JobDto>),
    )
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Query(page): Query<PageParams>,
    Query(params): Query<JobListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = page.clamped();
    let request = listing_request(&params);
    let (rows, total) = state
        .job_service
        .list_jobs(viewer.as_ref(), &request, page.limit, page.offset())
        .await?;
    let items: Vec<JobDto> = rows.into_iter().map(JobDto::from).collect();
    Ok(Json(PageResponse::new(items, total, page)))
}

/// `GET /jobs/{id}` — One posting.
///
/// # Errors
///
/// Returns [`ApiError`] when the posting does not exist.
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    summary = "Get a job posting",
    description = "Returns one posting. Views from anyone other than the owning employer bump the view counter.",
    responses(
        (status = 200, description = "The posting", body = JobResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(id): Path<JobId>,
) -> Result<impl IntoResponse, ApiError> {
    let job = state.job_service.get_job(id, viewer.as_ref()).await?;
    Ok(Json(JobResponse::from(job)))
}

/// `PUT /jobs/{id}` — Update a posting.
///
/// # Errors
///
/// Returns [`ApiError`] when the posting does not exist or the actor is
/// neither owner nor admin.
#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    summary = "Update a job posting",
    description = "Applies partial changes. Only the owning employer or an admin may update; counters and ownership are not writable.",
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Updated posting", body = JobResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
    )
)]
pub async fn update_job(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<JobId>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let job = state.job_service.update_job(id, &user, req.into()).await?;
    Ok(Json(JobResponse::from(job)))
}

/// `DELETE /jobs/{id}` — Delete a posting.
///
/// # Errors
///
/// Returns [`ApiError`] when the posting does not exist or the actor is
/// neither owner nor admin.
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "Jobs",
    summary = "Delete a job posting",
    description = "Removes the posting and, via cascade, its applications and bookmarks.",
    responses(
        (status = 200, description = "Posting deleted", body = AckResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
    )
)]
pub async fn delete_job(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<JobId>,
) -> Result<impl IntoResponse, ApiError> {
    state.job_service.delete_job(id, &user).await?;
    Ok(Json(AckResponse::new("Job deleted")))
}

/// Translates the query string into the service-level listing request.
fn listing_request(params: &JobListParams) -> JobListRequest {
    JobListRequest {
        filter: JobFilter {
            q: params.q.clone(),
            job_type: params.job_type,
            category: params.category.clone(),
            location: params.location.clone(),
            experience: params.experience,
            status: params.status,
            employer_id: None,
        },
        my_jobs: params.my_jobs.unwrap_or(false),
        sort: params
            .sort
            .as_deref()
            .map_or(JobSort::NewestFirst, JobSort::parse),
    }
}

/// Job routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route(
            "/jobs/{id}",
            get(get_job).put(update_job).delete(delete_job),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_request_defaults_to_newest_first() {
        let request = listing_request(&JobListParams::default());
        assert_eq!(request.sort, JobSort::NewestFirst);
        assert!(!request.my_jobs);
        assert!(request.filter.employer_id.is_none());
    }

    #[test]
    fn unknown_sort_falls_back_to_newest_first() {
        let params = JobListParams {
            sort: Some("-salary".to_string()),
            ..JobListParams::default()
        };
        assert_eq!(listing_request(&params).sort, JobSort::NewestFirst);
    }
}
