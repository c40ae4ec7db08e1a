//! Registration, login, token authentication, and profile self-service.

use crate::auth::TokenService;
use crate::auth::password;
use crate::domain::{UserId, UserRole};
use crate::error::ApiError;
use crate::persistence::models::UserRecord;
use crate::persistence::{NewUser, ProfileChanges, UserStore};

/// Registration input, already shaped by the API layer.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before it ever reaches storage.
    pub password: String,
    /// Requested role; defaults to jobseeker. Admin is never
    /// self-assignable.
    pub role: Option<UserRole>,
}

/// Account and credential operations.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserStore,
    tokens: TokenService,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Creates the service.
    #[must_use]
    pub fn new(users: UserStore, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    /// Registers a new account and returns it together with a fresh
    /// bearer token.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for malformed input, [`ApiError::Conflict`]
    /// when the email is already in use.
    pub async fn register(&self, input: RegisterInput) -> Result<(String, UserRecord), ApiError> {
        validate_name(&input.first_name, "firstName")?;
        validate_name(&input.last_name, "lastName")?;
        if !looks_like_email(&input.email) {
            return Err(ApiError::validation("Please enter a valid email"));
        }
        if !password::meets_policy(&input.password) {
            return Err(ApiError::validation(
                "Password must be at least 8 characters with an uppercase letter, \
                 a lowercase letter, and a digit",
            ));
        }
        let role = match input.role {
            None => UserRole::Jobseeker,
            Some(UserRole::Admin) => {
                return Err(ApiError::validation("Invalid user type"));
            }
            Some(role) => role,
        };

        // Advisory pre-check; the unique index on email is authoritative.
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::conflict("Email already in use"));
        }

        let new = NewUser {
            id: UserId::new(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash: password::hash(&input.password, self.bcrypt_cost)?,
            role,
        };
        let user = match self.users.insert(&new).await {
            Ok(user) => user,
            Err(e) if e.is_unique_violation() => {
                return Err(ApiError::conflict("Email already in use"));
            }
            Err(e) => return Err(e),
        };

        let token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok((token, user))
    }

    /// Verifies credentials, stamps the last login, and returns the user
    /// with a fresh bearer token.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] for unknown email, wrong password, or a
    /// deactivated account — all with the same message, so the response
    /// never reveals which part was wrong.
    pub async fn login(&self, email: &str, plaintext: &str) -> Result<(String, UserRecord), ApiError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        };
        if !password::verify(plaintext, &user.password_hash)? {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }
        if !user.is_active {
            return Err(ApiError::Unauthorized("Account deactivated".to_string()));
        }

        // Best-effort stamp; a failed write must not fail the login.
        if let Err(e) = self.users.touch_last_login(user.id).await {
            tracing::warn!(user_id = %user.id, error = %e, "last-login stamp failed");
        }

        let token = self.tokens.issue(user.id)?;
        Ok((token, user))
    }

    /// Resolves a bearer token to its (active) user.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] for invalid tokens, vanished users, or
    /// deactivated accounts.
    pub async fn authenticate(&self, token: &str) -> Result<UserRecord, ApiError> {
        let user_id = self.tokens.verify(token)?;
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Err(ApiError::Unauthorized("Not authorized".to_string()));
        };
        if !user.is_active {
            return Err(ApiError::Unauthorized("Account deactivated".to_string()));
        }
        Ok(user)
    }

    /// Applies allow-listed profile changes for the acting user.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for over-length fields,
    /// [`ApiError::NotFound`] if the account vanished mid-request.
    pub async fn update_profile(
        &self,
        actor_id: UserId,
        changes: ProfileChanges,
    ) -> Result<UserRecord, ApiError> {
        if let Some(first_name) = &changes.first_name {
            validate_name(first_name, "firstName")?;
        }
        if let Some(last_name) = &changes.last_name {
            validate_name(last_name, "lastName")?;
        }
        if let Some(bio) = &changes.bio
            && bio.chars().count() > 500
        {
            return Err(ApiError::validation("bio must be at most 500 characters"));
        }
        self.users
            .update_profile(actor_id, &changes)
            .await?
            .ok_or(ApiError::NotFound("User"))
    }

    /// Stores the avatar URL produced by the external media service.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an empty URL, [`ApiError::NotFound`]
    /// if the account vanished mid-request.
    pub async fn set_avatar(&self, actor_id: UserId, url: &str) -> Result<UserRecord, ApiError> {
        if url.trim().is_empty() {
            return Err(ApiError::validation("avatar URL is required"));
        }
        self.users
            .set_avatar(actor_id, url.trim())
            .await?
            .ok_or(ApiError::NotFound("User"))
    }

    /// Looks up any user by id for authenticated callers.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when no such account exists.
    pub async fn get_user(&self, id: UserId) -> Result<UserRecord, ApiError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("User"))
    }

    /// Looks up a user for the anonymous public-profile view.
    /// Deactivated accounts are indistinguishable from missing ones.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when absent or deactivated.
    pub async fn public_profile(&self, id: UserId) -> Result<UserRecord, ApiError> {
        match self.users.find_by_id(id).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(ApiError::NotFound("User")),
        }
    }

    /// Removes the acting user's stored resume link.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] if the account vanished mid-request.
    pub async fn clear_resume(&self, actor_id: UserId) -> Result<UserRecord, ApiError> {
        self.users
            .clear_resume(actor_id)
            .await?
            .ok_or(ApiError::NotFound("User"))
    }
}

fn validate_name(value: &str, field: &str) -> Result<(), ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > 50 {
        return Err(ApiError::Validation(format!(
            "{field} must be at most 50 characters"
        )));
    }
    Ok(())
}

/// Minimal structural email check: nonempty local part and a dotted
/// domain. Real validation happens when mail is actually sent.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_check() {
        assert!(looks_like_email("jane@example.com"));
        assert!(looks_like_email("jane.doe+tag@mail.example.org"));
        assert!(!looks_like_email("jane"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("jane@"));
        assert!(!looks_like_email("jane@nodot"));
        assert!(!looks_like_email("jane@.com"));
    }

    #[test]
    fn names_are_required_and_bounded() {
        assert!(validate_name("Jane", "firstName").is_ok());
        assert!(validate_name("  ", "firstName").is_err());
        assert!(validate_name(&"x".repeat(51), "firstName").is_err());
        assert!(validate_name(&"x".repeat(50), "firstName").is_ok());
    }
}
