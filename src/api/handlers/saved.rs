//! Saved-job bookmark handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    AckResponse, PageParams, PageResponse, SaveJobRequest, SavedJobDto, SavedJobResponse,
};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::JobId;
use crate::error::{ApiError, ErrorResponse};

/// `POST /saved/{job_id}` — Bookmark a job.
///
/// # Errors
///
/// Returns [`ApiError`] when the job does not exist or the note is too
/// long.
#[utoipa::path(
    post,
    path = "/api/saved/{job_id}",
    tag = "Saved jobs",
    summary = "Save a job",
    description = "Bookmarks the job for the caller. Saving again updates the note instead of erroring.",
    request_body = SaveJobRequest,
    responses(
        (status = 201, description = "Bookmark stored", body = SavedJobResponse),
        (status = 400, description = "Note too long", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
    )
)]
pub async fn save_job(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(job_id): Path<JobId>,
    Json(req): Json<SaveJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = req.note.unwrap_or_default();
    let saved = state.saved_job_service.save(&user, job_id, &note).await?;
    Ok((StatusCode::CREATED, Json(SavedJobResponse::from(saved))))
}

/// `GET /saved` — The caller's bookmarks.
///
/// # Errors
///
/// Returns [`ApiError`] on query failure.
#[utoipa::path(
    get,
    path = "/api/saved",
    tag = "Saved jobs",
    summary = "List saved jobs",
    description = "Returns the caller's bookmarks, newest first, each joined with a job summary.",
    params(PageParams),
    responses(
        (status = 200, description = "Page of bookmarks", body = PageResponse<SavedJobDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn list_saved_jobs(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(page): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = page.clamped();
    let (rows, total) = state
        .saved_job_service
        .list(&user, page.limit, page.offset())
        .await?;
    let items: Vec<SavedJobDto> = rows.into_iter().map(SavedJobDto::from).collect();
    Ok(Json(PageResponse::new(items, total, page)))
}

/// `DELETE /saved/{job_id}` — Remove a bookmark.
///
/// # Errors
///
/// Returns [`ApiError`] when no bookmark exists for the pair.
#[utoipa::path(
    delete,
    path = "/api/saved/{job_id}",
    tag = "Saved jobs",
    summary = "Remove a saved job",
    description = "Deletes the caller's bookmark for the job.",
    responses(
        (status = 200, description = "Bookmark removed", body = AckResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Bookmark not found", body = ErrorResponse),
    )
)]
pub async fn remove_saved_job(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(job_id): Path<JobId>,
) -> Result<impl IntoResponse, ApiError> {
    state.saved_job_service.remove(&user, job_id).await?;
    Ok(Json(AckResponse::new("Saved job removed")))
}

/// Saved-job routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/saved", get(list_saved_jobs))
        .route(
            "/saved/{job_id}",
            post(save_job).delete(remove_saved_job),
        )
}
