//! User storage: account creation, lookup, and profile updates.

use sqlx::PgPool;

use super::models::UserRecord;
use crate::domain::{UserId, UserRole};
use crate::error::ApiError;

/// Fields required to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Pre-generated primary key.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email; stored lowercased.
    pub email: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
}

/// Self-service profile fields. `None` leaves the column untouched; the
/// struct itself is the update allow-list.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Profile bio.
    pub bio: Option<String>,
    /// Skill tags.
    pub skills: Option<Vec<String>>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Resume link.
    pub resume_url: Option<String>,
}

/// PostgreSQL-backed user store.
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    /// Creates a new store over the shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new user and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on failure; a unique violation on
    /// the email index surfaces here and is translated to a conflict by
    /// the caller.
    pub async fn insert(&self, new: &NewUser) -> Result<UserRecord, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, role) \
             VALUES ($1, $2, $3, lower($4), $5, $6) RETURNING *",
        )
        .bind(new.id)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(new.role)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Looks up a user by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE email = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Stamps `last_login` to now.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn touch_last_login(&self, id: UserId) -> Result<(), ApiError> {
        sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Applies allow-listed profile changes and returns the updated row,
    /// or `None` if the user no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<UserRecord>, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>(
            "UPDATE users SET \
               first_name = COALESCE($2, first_name), \
               last_name = COALESCE($3, last_name), \
               phone = COALESCE($4, phone), \
               location = COALESCE($5, location), \
               bio = COALESCE($6, bio), \
               skills = COALESCE($7, skills), \
               avatar = COALESCE($8, avatar), \
               resume_url = COALESCE($9, resume_url), \
               updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.phone)
        .bind(&changes.location)
        .bind(&changes.bio)
        .bind(&changes.skills)
        .bind(&changes.avatar)
        .bind(&changes.resume_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Sets the avatar URL and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn set_avatar(&self, id: UserId, url: &str) -> Result<Option<UserRecord>, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>(
            "UPDATE users SET avatar = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Clears the stored resume link and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn clear_resume(&self, id: UserId) -> Result<Option<UserRecord>, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>(
            "UPDATE users SET resume_url = NULL, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
