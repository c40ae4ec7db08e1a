//! Axum extractors binding the bearer token to a loaded user record.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::persistence::models::UserRecord;

/// Extractor for routes that require a valid bearer token.
///
/// Rejects with `401` when the header is missing, malformed, the token
/// fails verification, or the account no longer exists or is inactive.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserRecord);

/// Extractor for routes where authentication is optional.
///
/// Never rejects: an absent or invalid token yields `None`, so the
/// route behaves as an anonymous request.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<UserRecord>);

/// Pulls the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Err(ApiError::Unauthorized("Not authorized".to_string()));
        };
        let user = state.auth_service.authenticate(token).await?;
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Self(None));
        };
        match state.auth_service.authenticate(token).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(_) => Ok(Self(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[allow(clippy::panic)]
    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let Ok(request) = builder.body(()) else {
            panic!("request must build")
        };
        request.into_parts().0
    }

    #[test]
    fn extracts_token_from_bearer_header() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        assert_eq!(bearer_token(&parts_with(None)), None);
        assert_eq!(bearer_token(&parts_with(Some("abc.def.ghi"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic dXNlcg=="))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
    }
}
