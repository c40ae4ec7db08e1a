//! Database row models for the five collections and their joined forms.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApplicationId, ApplicationStatus, ExperienceLevel, JobId, JobStatus, JobType, Salary,
    SalaryPeriod, SavedJobId, UserId, UserRole,
};

/// A user row from the `users` table.
///
/// Never serialized directly; the wire shape (which omits
/// `password_hash`) is built by the API layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    /// Primary key.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique, stored lowercased.
    pub email: String,
    /// bcrypt hash. Never leaves the persistence/service layers.
    pub password_hash: String,
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
    /// Resume link, if uploaded.
    pub resume_url: Option<String>,
    /// Email verification flag.
    pub is_email_verified: bool,
    /// Deactivated accounts cannot authenticate.
    pub is_active: bool,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A job posting row from the `jobs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobRecord {
    /// Primary key.
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
    /// Salary lower bound.
    pub salary_min: Option<i64>,
    /// Salary upper bound.
    pub salary_max: Option<i64>,
    /// Salary currency code.
    pub salary_currency: String,
    /// Salary period.
    pub salary_period: SalaryPeriod,
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
    /// View counter (best-effort, eventually consistent).
    pub views: i64,
    /// Application counter (best-effort, eventually consistent).
    pub applications_count: i64,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Reassembles the nested salary object from the flat columns.
    #[must_use]
    pub fn salary(&self) -> Salary {
        Salary {
            min: self.salary_min,
            max: self.salary_max,
            currency: self.salary_currency.clone(),
            period: self.salary_period,
        }
    }
}

/// A named document link attached to an application, stored in JSONB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DocumentLink {
    /// Display name.
    pub name: String,
    /// Document URL.
    pub url: String,
}

/// An application row from the `applications` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApplicationRecord {
    /// Primary key.
    pub id: ApplicationId,
    /// Applied-to job.
    pub job_id: JobId,
    /// Applying user.
    pub applicant_id: UserId,
    /// Job owner, denormalized from the job for fast ownership checks.
    pub employer_id: UserId,
    /// Review status.
    pub status: ApplicationStatus,
    /// Optional cover letter.
    pub cover_letter: Option<String>,
    /// Resume link (required on apply).
    pub resume_url: String,
    /// Extra documents as JSONB.
    pub additional_documents: sqlx::types::Json<Vec<DocumentLink>>,
    /// Employer notes.
    pub notes: Option<String>,
    /// Submission timestamp.
    pub applied_at: DateTime<Utc>,
    /// Re-stamped on every non-pending status update.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Interview scheduling flag.
    pub interview_scheduled: bool,
    /// Scheduled interview time.
    pub interview_date: Option<DateTime<Utc>>,
    /// Interview notes.
    pub interview_notes: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// An application joined with summaries of its job and applicant.
///
/// One row type serves all three listing views; the queries alias the
/// joined columns with `job_` / `applicant_` prefixes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApplicationListRow {
    /// The application itself.
    #[sqlx(flatten)]
    pub application: ApplicationRecord,
    /// Job title.
    pub job_title: String,
    /// Job company.
    pub job_company: String,
    /// Job location.
    pub job_location: String,
    /// Job employment type.
    pub job_employment_type: JobType,
    /// Job lifecycle status.
    pub job_status: JobStatus,
    /// Applicant given name.
    pub applicant_first_name: String,
    /// Applicant family name.
    pub applicant_last_name: String,
    /// Applicant email.
    pub applicant_email: String,
    /// Applicant avatar URL.
    pub applicant_avatar: String,
}

/// A bookmark row from the `saved_jobs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedJobRecord {
    /// Primary key.
    pub id: SavedJobId,
    /// Bookmarking user.
    pub user_id: UserId,
    /// Bookmarked job.
    pub job_id: JobId,
    /// Free-text note ("" when unset).
    pub note: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A bookmark joined with a summary of its job.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedJobListRow {
    /// The bookmark itself.
    #[sqlx(flatten)]
    pub saved: SavedJobRecord,
    /// Job title.
    pub job_title: String,
    /// Job company.
    pub job_company: String,
    /// Job location.
    pub job_location: String,
    /// Job employment type.
    pub job_employment_type: JobType,
    /// Job lifecycle status.
    pub job_status: JobStatus,
}

/// An analytics event row from the `analytics_events` table. Append-only.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalyticsEventRecord {
    /// Auto-increment row ID.
    pub id: i64,
    /// Event name discriminator (e.g. `"job_viewed"`).
    pub event_name: String,
    /// Acting user, when authenticated.
    pub user_id: Option<UserId>,
    /// Related job, when applicable.
    pub job_id: Option<JobId>,
    /// Client session identifier.
    pub session_id: Option<String>,
    /// Page path.
    pub page: Option<String>,
    /// Referrer URL.
    pub referrer: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// Client IP.
    pub ip: Option<String>,
    /// Arbitrary JSONB metadata.
    pub metadata: sqlx::types::Json<serde_json::Value>,
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Application count for one status, from the overview breakdown query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatusCountRow {
    /// Application status.
    pub status: ApplicationStatus,
    /// Number of applications in that status.
    pub count: i64,
}

/// Row count for one calendar day, from the timeseries query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DayCountRow {
    /// Calendar day (UTC).
    pub day: NaiveDate,
    /// Number of rows created that day.
    pub count: i64,
}

/// A job joined with its total application count, from the top-jobs query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopJobRow {
    /// The job itself.
    #[sqlx(flatten)]
    pub job: JobRecord,
    /// Applications received, all time.
    pub total_applications: i64,
}
