//! Account handlers: register, login, current user, profile, avatar.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{
    AuthResponse, AvatarRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::error::{ApiError, ErrorResponse};

/// `POST /auth/register` — Create an account and issue a token.
///
/// # Errors
///
/// Returns [`ApiError`] on validation failure or a duplicate email.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    summary = "Register a new account",
    description = "Creates a jobseeker or employer account and returns a signed bearer token. The admin role cannot be self-assigned.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = state.auth_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(token, user))))
}

/// `POST /auth/login` — Exchange credentials for a token.
///
/// # Errors
///
/// Returns [`ApiError`] on bad credentials or a deactivated account.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    summary = "Log in",
    description = "Verifies credentials and returns a signed bearer token. Unknown emails and wrong passwords produce the same error.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(AuthResponse::new(token, user)))
}

/// `GET /auth/me` — The authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    summary = "Current user",
    description = "Returns the profile of the bearer-token holder.",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(UserResponse::from(user))
}

/// `PUT /auth/profile` — Update writable profile fields.
///
/// # Errors
///
/// Returns [`ApiError`] on validation failure.
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = "Auth",
    summary = "Update profile",
    description = "Applies partial changes to the writable profile fields. Role, email, and account flags cannot be changed here.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid profile data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.auth_service.update_profile(user.id, req.into()).await?;
    Ok(Json(UserResponse::from(updated)))
}

/// `PUT /auth/avatar` — Set the avatar URL.
///
/// # Errors
///
/// Returns [`ApiError`] on a blank URL.
#[utoipa::path(
    put,
    path = "/api/auth/avatar",
    tag = "Auth",
    summary = "Set avatar",
    description = "Stores the URL of an externally uploaded avatar image.",
    request_body = AvatarRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid avatar URL", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn set_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<AvatarRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.auth_service.set_avatar(user.id, &req.avatar).await?;
    Ok(Json(UserResponse::from(updated)))
}

/// Auth routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/profile", put(update_profile))
        .route("/auth/avatar", put(set_avatar))
}
