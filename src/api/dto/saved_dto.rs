//! Saved-job bookmark DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{JobId, SavedJobId};
use crate::persistence::models::{SavedJobListRow, SavedJobRecord};

use super::application_dto::ApplicationJobDto;

/// Request body for `POST /api/saved/{job_id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SaveJobRequest {
    /// Free-text note (max 500 chars).
    #[serde(default)]
    pub note: Option<String>,
}

/// A bookmark, optionally joined with its job summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobDto {
    /// Bookmark identifier.
    pub id: SavedJobId,
    /// Bookmarked job.
    pub job_id: JobId,
    /// Free-text note ("" when unset).
    pub note: String,
    /// Bookmark creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Joined job summary (list endpoint only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<ApplicationJobDto>,
}

impl From<SavedJobRecord> for SavedJobDto {
    fn from(record: SavedJobRecord) -> Self {
        Self {
            id: record.id,
            job_id: record.job_id,
            note: record.note,
            created_at: record.created_at,
            job: None,
        }
    }
}

impl From<SavedJobListRow> for SavedJobDto {
    fn from(row: SavedJobListRow) -> Self {
        let job = ApplicationJobDto {
            id: row.saved.job_id,
            title: row.job_title,
            company: row.job_company,
            location: row.job_location,
            job_type: row.job_employment_type,
            status: row.job_status,
        };
        let mut dto = Self::from(row.saved);
        dto.job = Some(job);
        dto
    }
}

/// Response body for `POST /api/saved/{job_id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobResponse {
    /// Always `true`.
    pub success: bool,
    /// The bookmark.
    pub saved_job: SavedJobDto,
}

impl From<SavedJobRecord> for SavedJobResponse {
    fn from(record: SavedJobRecord) -> Self {
        Self {
            success: true,
            saved_job: record.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobStatus, JobType, UserId};
    use chrono::Utc;

    #[test]
    #[allow(clippy::panic)]
    fn joined_row_carries_job_summary() {
        let now = Utc::now();
        let row = SavedJobListRow {
            saved: SavedJobRecord {
                id: SavedJobId::new(),
                user_id: UserId::new(),
                job_id: JobId::new(),
                note: "follow up".to_string(),
                created_at: now,
                updated_at: now,
            },
            job_title: "Backend Engineer".to_string(),
            job_company: "Acme".to_string(),
            job_location: "Remote".to_string(),
            job_employment_type: JobType::FullTime,
            job_status: JobStatus::Active,
        };
        let dto = SavedJobDto::from(row);
        let Some(job) = dto.job else {
            panic!("job summary must be present")
        };
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(dto.note, "follow up");
    }
}
