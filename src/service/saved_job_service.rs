//! Saved-job bookmarks.

use crate::domain::JobId;
use crate::error::ApiError;
use crate::persistence::models::{SavedJobListRow, SavedJobRecord, UserRecord};
use crate::persistence::{JobStore, SavedJobStore};

/// Orchestrates bookmark operations over the [`SavedJobStore`].
#[derive(Debug, Clone)]
pub struct SavedJobService {
    saved: SavedJobStore,
    jobs: JobStore,
}

impl SavedJobService {
    /// Creates the service.
    #[must_use]
    pub fn new(saved: SavedJobStore, jobs: JobStore) -> Self {
        Self { saved, jobs }
    }

    /// Bookmarks a job for the acting user. Saving the same job again
    /// updates the note rather than erroring.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the job does not exist,
    /// [`ApiError::Validation`] for an over-length note.
    pub async fn save(
        &self,
        actor: &UserRecord,
        job_id: JobId,
        note: &str,
    ) -> Result<SavedJobRecord, ApiError> {
        if note.chars().count() > 500 {
            return Err(ApiError::validation("note must be at most 500 characters"));
        }
        if self.jobs.find_by_id(job_id).await?.is_none() {
            return Err(ApiError::NotFound("Job"));
        }
        self.saved.upsert(actor.id, job_id, note).await
    }

    /// Lists the acting user's bookmarks, newest first, joined with job
    /// summaries.
    ///
    /// # Errors
    ///
    /// [`ApiError::Database`] on query failure.
    pub async fn list(
        &self,
        actor: &UserRecord,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<SavedJobListRow>, i64), ApiError> {
        self.saved.list(actor.id, limit, offset).await
    }

    /// Removes a bookmark.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when no bookmark exists for the pair.
    pub async fn remove(&self, actor: &UserRecord, job_id: JobId) -> Result<(), ApiError> {
        if !self.saved.delete(actor.id, job_id).await? {
            return Err(ApiError::NotFound("Saved job"));
        }
        Ok(())
    }
}
