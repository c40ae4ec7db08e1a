//! Saved-job bookmark storage.

use sqlx::PgPool;

use super::models::{SavedJobListRow, SavedJobRecord};
use crate::domain::{JobId, SavedJobId, UserId};
use crate::error::ApiError;

/// PostgreSQL-backed bookmark store.
#[derive(Debug, Clone)]
pub struct SavedJobStore {
    pool: PgPool,
}

impl SavedJobStore {
    /// Creates a new store over the shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upserts a bookmark keyed on `(user_id, job_id)`: saving the same
    /// job twice updates the note instead of erroring.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn upsert(
        &self,
        user_id: UserId,
        job_id: JobId,
        note: &str,
    ) -> Result<SavedJobRecord, ApiError> {
        let row = sqlx::query_as::<_, SavedJobRecord>(
            "INSERT INTO saved_jobs (id, user_id, job_id, note) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, job_id) \
             DO UPDATE SET note = EXCLUDED.note, updated_at = now() \
             RETURNING *",
        )
        .bind(SavedJobId::new())
        .bind(user_id)
        .bind(job_id)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Removes a bookmark. Returns `false` when none existed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn delete(&self, user_id: UserId, job_id: JobId) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
            .bind(user_id)
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns one page of the user's bookmarks, newest first, joined
    /// with job summaries, plus the total count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list(
        &self,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<SavedJobListRow>, i64), ApiError> {
        let items = sqlx::query_as::<_, SavedJobListRow>(
            "SELECT s.*, j.title AS job_title, j.company AS job_company, \
               j.location AS job_location, j.job_type AS job_employment_type, \
               j.status AS job_status \
             FROM saved_jobs s JOIN jobs j ON j.id = s.job_id \
             WHERE s.user_id = $1 \
             ORDER BY s.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saved_jobs WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }
}
