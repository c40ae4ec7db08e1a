//! User lookup handlers: full profile, public profile, resume removal.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::api::dto::{PublicUserResponse, UserResponse};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::UserId;
use crate::error::{ApiError, ErrorResponse};

/// `GET /users/{id}` — Any user's profile, for authenticated callers.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when no such account exists.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Get a user",
    description = "Returns a user's profile. Requires a bearer token.",
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// `GET /users/public/{id}` — The anonymous public-profile view.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when absent or deactivated.
#[utoipa::path(
    get,
    path = "/api/users/public/{id}",
    tag = "Users",
    summary = "Get a public profile",
    description = "Returns the public slice of a profile without authentication. Email, phone, account flags, and login history are omitted. Deactivated accounts resolve as not found.",
    responses(
        (status = 200, description = "The public profile", body = PublicUserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn public_profile(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth_service.public_profile(id).await?;
    Ok(Json(PublicUserResponse::from(user)))
}

/// `DELETE /users/me/resume` — Remove the caller's resume link.
///
/// # Errors
///
/// Returns [`ApiError`] when the account no longer exists.
#[utoipa::path(
    delete,
    path = "/api/users/me/resume",
    tag = "Users",
    summary = "Remove resume",
    description = "Clears the stored resume link from the caller's profile and returns the updated user.",
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn clear_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.auth_service.clear_resume(user.id).await?;
    Ok(Json(UserResponse::from(updated)))
}

/// User routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(get_user))
        .route("/users/public/{id}", get(public_profile))
        .route("/users/me/resume", delete(clear_resume))
}
