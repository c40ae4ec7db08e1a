//! Job catalog DTOs for create, get, list, and update operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ExperienceLevel, JobId, JobStatus, JobType, Salary, UserId};
use crate::persistence::models::JobRecord;
use crate::persistence::{JobChanges, NewJob};

/// Request body for `POST /api/jobs`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    /// Posting title.
    pub title: String,
    /// Posting body.
    pub description: String,
    /// Hiring company name.
    pub company: String,
    /// Job location.
    pub location: String,
    /// Employment type.
    pub job_type: JobType,
    /// Listing category.
    pub category: String,
    /// Salary range.
    #[serde(default)]
    pub salary: Option<Salary>,
    /// Ordered requirement lines.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Skill tags.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Benefit lines.
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Featured flag.
    #[serde(default)]
    pub featured: bool,
    /// Application deadline.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Required experience level.
    pub experience: ExperienceLevel,
}

impl CreateJobRequest {
    /// Builds the insertable job. The employer is overwritten by the
    /// service from the authenticated actor.
    #[must_use]
    pub fn into_new_job(self, employer_id: UserId) -> NewJob {
        NewJob {
            id: JobId::new(),
            title: self.title,
            description: self.description,
            company: self.company,
            location: self.location,
            job_type: self.job_type,
            category: self.category,
            salary: self.salary.unwrap_or_default(),
            requirements: self.requirements,
            skills: self.skills,
            benefits: self.benefits,
            employer_id,
            status: JobStatus::Active,
            featured: self.featured,
            deadline: self.deadline,
            experience: self.experience,
        }
    }
}

/// Request body for `PUT /api/jobs/{id}`. Only these fields are
/// writable; counters and ownership are never client-assignable.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    /// Posting title.
    #[serde(default)]
    pub title: Option<String>,
    /// Posting body.
    #[serde(default)]
    pub description: Option<String>,
    /// Hiring company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Job location.
    #[serde(default)]
    pub location: Option<String>,
    /// Employment type.
    #[serde(default)]
    pub job_type: Option<JobType>,
    /// Listing category.
    #[serde(default)]
    pub category: Option<String>,
    /// Salary range; replaces the whole salary object when present.
    #[serde(default)]
    pub salary: Option<Salary>,
    /// Ordered requirement lines.
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    /// Skill tags.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    /// Benefit lines.
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<JobStatus>,
    /// Featured flag.
    #[serde(default)]
    pub featured: Option<bool>,
    /// Application deadline.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Required experience level.
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
}

impl From<UpdateJobRequest> for JobChanges {
    fn from(request: UpdateJobRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            company: request.company,
            location: request.location,
            job_type: request.job_type,
            category: request.category,
            salary: request.salary,
            requirements: request.requirements,
            skills: request.skills,
            benefits: request.benefits,
            status: request.status,
            featured: request.featured,
            deadline: request.deadline,
            experience: request.experience,
        }
    }
}

/// Query parameters for `GET /api/jobs`, on top of pagination.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct JobListParams {
    /// Free-text search across title, company, and description.
    #[serde(default)]
    pub q: Option<String>,
    /// Employment type.
    #[serde(default)]
    pub job_type: Option<JobType>,
    /// Exact category match.
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive location substring.
    #[serde(default)]
    pub location: Option<String>,
    /// Experience level.
    #[serde(default)]
    pub experience: Option<ExperienceLevel>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<JobStatus>,
    /// When `"true"` for an authenticated employer, list their own
    /// postings across all statuses.
    #[serde(default)]
    pub my_jobs: Option<bool>,
    /// Sort key, e.g. `-createdAt` or `-views`.
    #[serde(default)]
    pub sort: Option<String>,
}

/// Full posting representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    /// Job identifier.
    pub id: JobId,
    /// Posting title.
    pub title: String,
    /// Posting body.
    pub description: String,
    /// Hiring company name.
    pub company: String,
    /// Job location.
    pub location: String,
    /// Employment type.
    pub job_type: JobType,
    /// Listing category.
    pub category: String,
    /// Salary range.
    pub salary: Salary,
    /// Ordered requirement lines.
    pub requirements: Vec<String>,
    /// Skill tags.
    pub skills: Vec<String>,
    /// Benefit lines.
    pub benefits: Vec<String>,
    /// Owning employer.
    pub employer_id: UserId,
    /// Lifecycle status.
    pub status: JobStatus,
    /// Featured flag.
    pub featured: bool,
    /// Application deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Required experience level.
    pub experience: ExperienceLevel,
    /// View counter.
    pub views: i64,
    /// Application counter.
    pub applications_count: i64,
    /// Posting creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<JobRecord> for JobDto {
    fn from(record: JobRecord) -> Self {
        let salary = record.salary();
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            company: record.company,
            location: record.location,
            job_type: record.job_type,
            category: record.category,
            salary,
            requirements: record.requirements,
            skills: record.skills,
            benefits: record.benefits,
            employer_id: record.employer_id,
            status: record.status,
            featured: record.featured,
            deadline: record.deadline,
            experience: record.experience,
            views: record.views,
            applications_count: record.applications_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response body for single-job endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobResponse {
    /// Always `true`.
    pub success: bool,
    /// The posting.
    pub job: JobDto,
}

impl From<JobRecord> for JobResponse {
    fn from(record: JobRecord) -> Self {
        Self {
            success: true,
            job: record.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_body(with_experience: bool) -> String {
        let experience = if with_experience {
            r#","experience":"senior""#
        } else {
            ""
        };
        format!(
            r#"{{"title":"Backend Engineer","description":"Build APIs","company":"Acme",
                "location":"Remote","jobType":"full-time","category":"engineering"{experience}}}"#
        )
    }

    #[test]
    fn create_request_requires_experience() {
        let parsed = serde_json::from_str::<CreateJobRequest>(&create_body(false));
        assert!(parsed.is_err());
    }

    #[test]
    #[allow(clippy::panic)]
    fn create_request_parses_with_experience() {
        let Ok(parsed) = serde_json::from_str::<CreateJobRequest>(&create_body(true)) else {
            panic!("request with experience must parse")
        };
        assert_eq!(parsed.experience, ExperienceLevel::Senior);
        assert_eq!(parsed.job_type, JobType::FullTime);
        assert!(parsed.salary.is_none());
    }
}
