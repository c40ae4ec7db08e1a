//! Application workflow: apply, the three listing views, and status
//! transitions.

use crate::domain::{ApplicationId, ApplicationStatus, JobId, JobStatus, authz};
use crate::error::ApiError;
use crate::persistence::models::{ApplicationListRow, ApplicationRecord, DocumentLink, UserRecord};
use crate::persistence::{ApplicationFilter, ApplicationStore, JobStore, NewApplication};

/// Submission input as shaped by the API layer.
#[derive(Debug, Clone, Default)]
pub struct ApplyInput {
    /// Optional cover letter.
    pub cover_letter: Option<String>,
    /// Resume link; required.
    pub resume_url: String,
    /// Extra documents.
    pub additional_documents: Vec<DocumentLink>,
}

/// Orchestrates the application workflow over the [`ApplicationStore`].
#[derive(Debug, Clone)]
pub struct ApplicationService {
    applications: ApplicationStore,
    jobs: JobStore,
}

impl ApplicationService {
    /// Creates the service.
    #[must_use]
    pub fn new(applications: ApplicationStore, jobs: JobStore) -> Self {
        Self { applications, jobs }
    }

    /// Submits an application for the acting user.
    ///
    /// The job must exist and be active, and the actor must not have
    /// applied before. The job's application counter is incremented as a
    /// best-effort side effect whose failure never fails the apply.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for a missing resume link or inactive
    /// job, [`ApiError::NotFound`] for an unknown job,
    /// [`ApiError::Conflict`] for a duplicate apply — whether caught by
    /// the advisory pre-check or by the unique index under a race.
    pub async fn apply(
        &self,
        actor: &UserRecord,
        job_id: JobId,
        input: ApplyInput,
    ) -> Result<ApplicationRecord, ApiError> {
        if input.resume_url.trim().is_empty() {
            return Err(ApiError::validation("resumeUrl is required"));
        }
        let Some(job) = self.jobs.find_by_id(job_id).await? else {
            return Err(ApiError::NotFound("Job"));
        };
        if job.status != JobStatus::Active {
            return Err(ApiError::validation("Job is not active"));
        }
        if self.applications.exists_for(job_id, actor.id).await? {
            return Err(ApiError::conflict("Already applied to this job"));
        }

        let new = NewApplication {
            id: ApplicationId::new(),
            job_id,
            applicant_id: actor.id,
            employer_id: job.employer_id,
            cover_letter: input.cover_letter,
            resume_url: input.resume_url.trim().to_string(),
            additional_documents: input.additional_documents,
        };
        let application = match self.applications.insert(&new).await {
            Ok(application) => application,
            // Losing writer of a concurrent duplicate apply.
            Err(e) if e.is_unique_violation() => {
                return Err(ApiError::conflict("Already applied to this job"));
            }
            Err(e) => return Err(e),
        };

        let jobs = self.jobs.clone();
        tokio::spawn(async move {
            if let Err(e) = jobs.increment_applications(job_id).await {
                tracing::warn!(job_id = %job_id, error = %e, "application counter increment failed");
            }
        });

        tracing::info!(application_id = %application.id, job_id = %job_id, "application submitted");
        Ok(application)
    }

    /// Lists the acting user's own applications, newest first.
    ///
    /// # Errors
    ///
    /// [`ApiError::Database`] on query failure.
    pub async fn list_for_applicant(
        &self,
        actor: &UserRecord,
        status: Option<ApplicationStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ApplicationListRow>, i64), ApiError> {
        let filter = ApplicationFilter {
            applicant_id: Some(actor.id),
            status,
            ..ApplicationFilter::default()
        };
        self.applications.list(&filter, limit, offset).await
    }

    /// Lists applications for one job; owner or admin only.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown job, [`ApiError::Forbidden`]
    /// for anyone but the owning employer or an admin.
    pub async fn list_for_job(
        &self,
        job_id: JobId,
        actor: &UserRecord,
        status: Option<ApplicationStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ApplicationListRow>, i64), ApiError> {
        let Some(job) = self.jobs.find_by_id(job_id).await? else {
            return Err(ApiError::NotFound("Job"));
        };
        if !authz::can_review_applications(actor.role, actor.id, job.employer_id) {
            return Err(ApiError::forbidden("Forbidden"));
        }
        let filter = ApplicationFilter {
            job_id: Some(job_id),
            status,
            ..ApplicationFilter::default()
        };
        self.applications.list(&filter, limit, offset).await
    }

    /// Lists every application across the acting employer's jobs.
    ///
    /// # Errors
    ///
    /// [`ApiError::Database`] on query failure.
    pub async fn list_for_employer(
        &self,
        actor: &UserRecord,
        status: Option<ApplicationStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ApplicationListRow>, i64), ApiError> {
        let filter = ApplicationFilter {
            employer_id: Some(actor.id),
            status,
            ..ApplicationFilter::default()
        };
        self.applications.list(&filter, limit, offset).await
    }

    /// Moves an application to `status` and optionally replaces the
    /// employer notes. Any non-pending status stamps `reviewed_at`.
    ///
    /// The status check is flat set membership: any of the five values is
    /// accepted from any current state.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for a status outside the enum (the stored
    /// record is left unchanged), [`ApiError::NotFound`] for an unknown
    /// application, [`ApiError::Forbidden`] for anyone but the owning
    /// employer or an admin.
    pub async fn update_status(
        &self,
        id: ApplicationId,
        actor: &UserRecord,
        status: &str,
        notes: Option<String>,
    ) -> Result<ApplicationRecord, ApiError> {
        // Validate before touching storage so a bad value leaves the
        // record untouched.
        let Some(status) = ApplicationStatus::parse(status) else {
            return Err(ApiError::validation("Invalid status"));
        };
        let Some(application) = self.applications.find_by_id(id).await? else {
            return Err(ApiError::NotFound("Application"));
        };
        if !authz::can_review_applications(actor.role, actor.id, application.employer_id) {
            return Err(ApiError::forbidden("Forbidden"));
        }

        self.applications
            .update_status(id, status, notes.as_deref(), status.marks_reviewed())
            .await?
            .ok_or(ApiError::NotFound("Application"))
    }
}
