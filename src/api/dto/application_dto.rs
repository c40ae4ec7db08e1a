//! Application workflow DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApplicationId, ApplicationStatus, JobId, JobStatus, JobType, UserId};
use crate::persistence::models::{ApplicationListRow, ApplicationRecord, DocumentLink};
use crate::service::application_service::ApplyInput;

/// Request body for `POST /api/applications/{job_id}/apply`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    /// Optional cover letter.
    #[serde(default)]
    pub cover_letter: Option<String>,
    /// Resume link; required.
    #[serde(default)]
    pub resume_url: Option<String>,
    /// Extra documents.
    #[serde(default)]
    pub additional_documents: Vec<DocumentLink>,
}

impl From<ApplyRequest> for ApplyInput {
    fn from(request: ApplyRequest) -> Self {
        Self {
            cover_letter: request.cover_letter,
            resume_url: request.resume_url.unwrap_or_default(),
            additional_documents: request.additional_documents,
        }
    }
}

/// Request body for `PATCH /api/applications/{id}/status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// New status, lowercase wire form.
    pub status: String,
    /// Optional reviewer notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Job summary embedded in application listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationJobDto {
    /// Job identifier.
    pub id: JobId,
    /// Posting title.
    pub title: String,
    /// Hiring company name.
    pub company: String,
    /// Job location.
    pub location: String,
    /// Employment type.
    pub job_type: JobType,
    /// Lifecycle status.
    pub status: JobStatus,
}

/// Applicant summary embedded in application listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDto {
    /// User identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL ("" when unset).
    pub avatar: String,
}

/// Full application representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDto {
    /// Application identifier.
    pub id: ApplicationId,
    /// Applied-to job.
    pub job_id: JobId,
    /// Applying user.
    pub applicant_id: UserId,
    /// Review status.
    pub status: ApplicationStatus,
    /// Optional cover letter.
    pub cover_letter: Option<String>,
    /// Resume link.
    pub resume_url: String,
    /// Extra documents.
    pub additional_documents: Vec<DocumentLink>,
    /// Employer notes.
    pub notes: Option<String>,
    /// Submission timestamp.
    pub applied_at: DateTime<Utc>,
    /// First review timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Joined job summary (list endpoints only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<ApplicationJobDto>,
    /// Joined applicant summary (list endpoints only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<ApplicantDto>,
}

impl From<ApplicationRecord> for ApplicationDto {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            id: record.id,
            job_id: record.job_id,
            applicant_id: record.applicant_id,
            status: record.status,
            cover_letter: record.cover_letter,
            resume_url: record.resume_url,
            additional_documents: record.additional_documents.0,
            notes: record.notes,
            applied_at: record.applied_at,
            reviewed_at: record.reviewed_at,
            job: None,
            applicant: None,
        }
    }
}

impl From<ApplicationListRow> for ApplicationDto {
    fn from(row: ApplicationListRow) -> Self {
        let job = ApplicationJobDto {
            id: row.application.job_id,
            title: row.job_title,
            company: row.job_company,
            location: row.job_location,
            job_type: row.job_employment_type,
            status: row.job_status,
        };
        let applicant = ApplicantDto {
            id: row.application.applicant_id,
            first_name: row.applicant_first_name,
            last_name: row.applicant_last_name,
            email: row.applicant_email,
            avatar: row.applicant_avatar,
        };
        let mut dto = Self::from(row.application);
        dto.job = Some(job);
        dto.applicant = Some(applicant);
        dto
    }
}

/// Response body for single-application endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationResponse {
    /// Always `true`.
    pub success: bool,
    /// The application.
    pub application: ApplicationDto,
}

impl From<ApplicationRecord> for ApplicationResponse {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            success: true,
            application: record.into(),
        }
    }
}
