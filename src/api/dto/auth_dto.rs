//! Account and profile DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{UserId, UserRole};
use crate::persistence::models::UserRecord;
use crate::persistence::ProfileChanges;
use crate::service::auth_service::RegisterInput;

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role. Defaults to `jobseeker`.
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            role: request.role,
        }
    }
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Request body for `PUT /api/auth/profile`.
///
/// Only these fields are writable through the profile endpoint. Role,
/// email, and account flags are never client-assignable.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-text location.
    #[serde(default)]
    pub location: Option<String>,
    /// Profile bio (max 500 chars).
    #[serde(default)]
    pub bio: Option<String>,
    /// Skill tags.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Resume link.
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            location: request.location,
            bio: request.bio,
            skills: request.skills,
            avatar: request.avatar,
            resume_url: request.resume_url,
        }
    }
}

/// Request body for `PUT /api/auth/avatar`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AvatarRequest {
    /// URL of the stored avatar image.
    pub avatar: String,
}

/// Public user representation. Never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// User identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Convenience concatenation of the name parts.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Account role.
    pub role: UserRole,
    /// Avatar URL ("" when unset).
    pub avatar: String,
    /// Phone number ("" when unset).
    pub phone: String,
    /// Free-text location ("" when unset).
    pub location: String,
    /// Profile bio ("" when unset).
    pub bio: String,
    /// Skill tags.
    pub skills: Vec<String>,
    /// Resume link, if any.
    pub resume_url: Option<String>,
    /// Email verification flag.
    pub is_email_verified: bool,
    /// Account active flag.
    pub is_active: bool,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserDto {
    fn from(record: UserRecord) -> Self {
        let full_name = record.full_name();
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            full_name,
            email: record.email,
            role: record.role,
            avatar: record.avatar,
            phone: record.phone,
            location: record.location,
            bio: record.bio,
            skills: record.skills,
            resume_url: record.resume_url,
            is_email_verified: record.is_email_verified,
            is_active: record.is_active,
            last_login: record.last_login,
            created_at: record.created_at,
        }
    }
}

/// Anonymous-facing user representation for `GET /api/users/public/{id}`.
///
/// Strips everything a stranger has no business seeing: email, phone,
/// verification and activity flags, and the last-login timestamp.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserDto {
    /// User identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Convenience concatenation of the name parts.
    pub full_name: String,
    /// Account role.
    pub role: UserRole,
    /// Avatar URL ("" when unset).
    pub avatar: String,
    /// Free-text location ("" when unset).
    pub location: String,
    /// Profile bio ("" when unset).
    pub bio: String,
    /// Skill tags.
    pub skills: Vec<String>,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for PublicUserDto {
    fn from(record: UserRecord) -> Self {
        let full_name = record.full_name();
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            full_name,
            role: record.role,
            avatar: record.avatar,
            location: record.location,
            bio: record.bio,
            skills: record.skills,
            created_at: record.created_at,
        }
    }
}

/// Response body for the public profile view.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicUserResponse {
    /// Always `true`.
    pub success: bool,
    /// The public slice of the profile.
    pub user: PublicUserDto,
}

impl From<UserRecord> for PublicUserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            success: true,
            user: record.into(),
        }
    }
}

/// Response body for register and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Always `true`.
    pub success: bool,
    /// Signed bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: UserDto,
}

impl AuthResponse {
    /// Wraps a freshly issued token and its user.
    #[must_use]
    pub fn new(token: String, user: UserRecord) -> Self {
        Self {
            success: true,
            token,
            user: user.into(),
        }
    }
}

/// Response body for profile reads and updates.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// Always `true`.
    pub success: bool,
    /// The user.
    pub user: UserDto,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            success: true,
            user: record.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn sample_record() -> UserRecord {
        UserRecord {
            id: UserId::new(),
            first_name: "Dana".to_owned(),
            last_name: "Reyes".to_owned(),
            email: "dana@example.com".to_owned(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_owned(),
            role: UserRole::Jobseeker,
            avatar: String::new(),
            phone: "+1 555 0100".to_owned(),
            location: "Lisbon".to_owned(),
            bio: String::new(),
            skills: vec!["rust".to_owned()],
            resume_url: None,
            is_email_verified: true,
            is_active: true,
            last_login: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    #[allow(clippy::panic)]
    fn public_dto_omits_private_fields() {
        let dto = PublicUserDto::from(sample_record());
        let Ok(serde_json::Value::Object(map)) = serde_json::to_value(&dto) else {
            panic!("public dto should serialize to an object");
        };
        for hidden in ["email", "phone", "isEmailVerified", "isActive", "lastLogin", "resumeUrl"] {
            assert!(!map.contains_key(hidden), "{hidden} leaked into the public view");
        }
        assert_eq!(map.get("fullName"), Some(&serde_json::json!("Dana Reyes")));
        assert_eq!(map.get("role"), Some(&serde_json::json!("jobseeker")));
    }
}
