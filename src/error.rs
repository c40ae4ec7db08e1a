//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the service. Each variant
//! maps to one HTTP status code and the uniform failure body
//! `{ "success": false, "message": "..." }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Uniform JSON failure body.
///
/// Every failed request answers with this shape:
/// ```json
/// { "success": false, "message": "Job not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` for failures.
    pub success: bool,
    /// Human-readable description of the failure.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Taxonomy
///
/// | Variant        | Meaning                                | HTTP Status |
/// |----------------|----------------------------------------|-------------|
/// | `Validation`   | Malformed or missing input             | 400         |
/// | `Unauthorized` | Missing/invalid/expired credential     | 401         |
/// | `Forbidden`    | Authenticated but not permitted        | 403         |
/// | `NotFound`     | Referenced entity absent               | 404         |
/// | `Conflict`     | Uniqueness violation                   | 409         |
/// | `Database`     | Storage unavailable or query failure   | 500         |
/// | `Internal`     | Any other unexpected fault             | 500         |
///
/// Expected conditions (the first five) carry their message to the client.
/// Unexpected faults are logged server-side and answered with a generic
/// "Server error" so internal detail never leaks.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed.
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but the operation is not permitted for this actor.
    #[error("{0}")]
    Forbidden(String),

    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// Persistence layer failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure.
    #[error("password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Convenience constructor for validation failures.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Convenience constructor for forbidden failures.
    #[must_use]
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Convenience constructor for conflict failures.
    #[must_use]
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::PasswordHash(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether this is an unexpected fault whose detail must not reach
    /// the client.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::PasswordHash(_) | Self::Internal(_)
        )
    }

    /// Whether the underlying database error is a unique-constraint
    /// violation. Used to translate the losing writer of a concurrent
    /// duplicate insert into a conflict response.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_unexpected() {
            tracing::error!(error = %self, "request failed with unexpected error");
            "Server error".to_string()
        } else {
            self.to_string()
        };
        let body = ErrorResponse {
            success: false,
            message,
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("nope").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("Job").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("duplicate").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(ApiError::NotFound("Job").to_string(), "Job not found");
    }

    #[test]
    fn unexpected_errors_are_flagged() {
        assert!(ApiError::Internal("x".into()).is_unexpected());
        assert!(!ApiError::NotFound("Job").is_unexpected());
        assert!(!ApiError::conflict("dup").is_unexpected());
    }

    #[test]
    fn row_not_found_is_not_a_unique_violation() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
    }
}
