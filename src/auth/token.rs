//! Stateless bearer tokens (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::error::ApiError;

/// JWT claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id as a UUID string.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues and verifies bearer tokens.
///
/// Built once at startup from the configured secret and lifetime, then
/// shared by the auth service and the request extractors.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys are secret material and deliberately not printed.
        f.debug_struct("TokenService")
            .field("ttl_hours", &self.ttl_hours)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a token service from the shared HMAC secret.
    #[must_use]
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Issues a signed token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(self.ttl_hours)).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
    }

    /// Verifies a token and extracts the subject user id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for expired, malformed, or
    /// tampered tokens.
    pub fn verify(&self, token: &str) -> Result<UserId, ApiError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| ApiError::Unauthorized("Not authorized".to_string()))?;
        let uuid: uuid::Uuid = data
            .claims
            .sub
            .parse()
            .map_err(|_| ApiError::Unauthorized("Not authorized".to_string()))?;
        Ok(UserId::from_uuid(uuid))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_round_trip() {
        let service = TokenService::new("test-secret", 1);
        let user_id = UserId::new();
        let Ok(token) = service.issue(user_id) else {
            panic!("issuing failed");
        };
        assert_eq!(service.verify(&token).ok(), Some(user_id));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let issuer = TokenService::new("secret-a", 1);
        let verifier = TokenService::new("secret-b", 1);
        let Ok(token) = issuer.issue(UserId::new()) else {
            panic!("issuing failed");
        };
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let service = TokenService::new("test-secret", 1);
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("").is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        // Negative TTL produces a token that is already expired.
        let service = TokenService::new("test-secret", -1);
        let Ok(token) = service.issue(UserId::new()) else {
            panic!("issuing failed");
        };
        assert!(service.verify(&token).is_err());
    }
}
