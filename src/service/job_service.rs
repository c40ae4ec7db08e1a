//! Job catalog service: posting CRUD, filtered listing, and the
//! owner-vs-viewer view counter rule.

use crate::domain::{JobId, JobSort, JobStatus, authz};
use crate::error::ApiError;
use crate::persistence::models::{JobRecord, UserRecord};
use crate::persistence::{JobChanges, JobFilter, JobStore, NewJob};

/// Listing parameters as they arrive from the API layer, before the
/// status-defaulting rule is applied.
#[derive(Debug, Clone, Default)]
pub struct JobListRequest {
    /// Base filter; `status: None` means "use the default".
    pub filter: JobFilter,
    /// When set by an authenticated employer, list their own postings
    /// (all statuses by default).
    pub my_jobs: bool,
    /// Sort order.
    pub sort: JobSort,
}

/// Orchestrates all job-posting operations over the [`JobStore`].
#[derive(Debug, Clone)]
pub struct JobService {
    jobs: JobStore,
}

impl JobService {
    /// Creates the service.
    #[must_use]
    pub fn new(jobs: JobStore) -> Self {
        Self { jobs }
    }

    /// Creates a new posting owned by the acting employer.
    ///
    /// # Errors
    ///
    /// [`ApiError::Forbidden`] for jobseekers, [`ApiError::Validation`]
    /// when a required field is blank.
    pub async fn create_job(&self, actor: &UserRecord, mut new: NewJob) -> Result<JobRecord, ApiError> {
        if !actor.role.can_post_jobs() {
            return Err(ApiError::forbidden("Forbidden for role"));
        }
        for (value, field) in [
            (&new.title, "title"),
            (&new.description, "description"),
            (&new.company, "company"),
            (&new.location, "location"),
            (&new.category, "category"),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::Validation(format!("{field} is required")));
            }
        }
        new.employer_id = actor.id;
        let job = self.jobs.insert(&new).await?;
        tracing::info!(job_id = %job.id, employer_id = %job.employer_id, "job created");
        Ok(job)
    }

    /// Returns one page of postings plus the total match count.
    ///
    /// Public listings default to active postings only; an authenticated
    /// employer asking for their own postings (`my_jobs`) sees every
    /// status unless they filter explicitly.
    ///
    /// # Errors
    ///
    /// [`ApiError::Database`] on query failure.
    pub async fn list_jobs(
        &self,
        viewer: Option<&UserRecord>,
        request: &JobListRequest,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<JobRecord>, i64), ApiError> {
        let filter = resolve_listing_filter(viewer, request);
        self.jobs.list(&filter, request.sort, limit, offset).await
    }

    /// Returns one posting, bumping the view counter as a best-effort
    /// side effect unless the viewer owns the posting.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the job does not exist.
    pub async fn get_job(
        &self,
        id: JobId,
        viewer: Option<&UserRecord>,
    ) -> Result<JobRecord, ApiError> {
        let Some(job) = self.jobs.find_by_id(id).await? else {
            return Err(ApiError::NotFound("Job"));
        };

        if authz::view_counts(viewer.map(|v| v.id), job.employer_id) {
            let jobs = self.jobs.clone();
            tokio::spawn(async move {
                if let Err(e) = jobs.increment_views(id).await {
                    tracing::warn!(job_id = %id, error = %e, "view counter increment failed");
                }
            });
        }

        Ok(job)
    }

    /// Applies allow-listed changes to a posting.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the job does not exist,
    /// [`ApiError::Forbidden`] when the actor is neither owner nor admin.
    pub async fn update_job(
        &self,
        id: JobId,
        actor: &UserRecord,
        changes: JobChanges,
    ) -> Result<JobRecord, ApiError> {
        let Some(job) = self.jobs.find_by_id(id).await? else {
            return Err(ApiError::NotFound("Job"));
        };
        if !authz::can_manage_job(actor.role, actor.id, job.employer_id) {
            return Err(ApiError::forbidden("Forbidden"));
        }
        self.jobs
            .update(id, &changes)
            .await?
            .ok_or(ApiError::NotFound("Job"))
    }

    /// Hard-deletes a posting.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when the job does not exist,
    /// [`ApiError::Forbidden`] when the actor is neither owner nor admin.
    pub async fn delete_job(&self, id: JobId, actor: &UserRecord) -> Result<(), ApiError> {
        let Some(job) = self.jobs.find_by_id(id).await? else {
            return Err(ApiError::NotFound("Job"));
        };
        if !authz::can_manage_job(actor.role, actor.id, job.employer_id) {
            return Err(ApiError::forbidden("Forbidden"));
        }
        if !self.jobs.delete(id).await? {
            return Err(ApiError::NotFound("Job"));
        }
        tracing::info!(job_id = %id, actor_id = %actor.id, "job deleted");
        Ok(())
    }
}

/// Applies the status-defaulting rule to a listing request.
///
/// `my_jobs` only takes effect for authenticated employers; everyone else
/// gets the public view. Public listings without an explicit status
/// filter see active postings only.
fn resolve_listing_filter(viewer: Option<&UserRecord>, request: &JobListRequest) -> JobFilter {
    let mut filter = request.filter.clone();

    let own_listing = request.my_jobs
        && viewer.is_some_and(|v| v.role == crate::domain::UserRole::Employer);
    if own_listing {
        filter.employer_id = viewer.map(|v| v.id);
    } else {
        filter.employer_id = None;
        if filter.status.is_none() {
            filter.status = Some(JobStatus::Active);
        }
    }

    filter
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{UserId, UserRole};
    use chrono::Utc;

    fn user(role: UserRole) -> UserRecord {
        UserRecord {
            id: UserId::new(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: String::new(),
            role,
            avatar: String::new(),
            phone: String::new(),
            location: String::new(),
            bio: String::new(),
            skills: vec![],
            resume_url: None,
            is_email_verified: false,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn anonymous_listing_defaults_to_active() {
        let request = JobListRequest::default();
        let filter = resolve_listing_filter(None, &request);
        assert_eq!(filter.status, Some(JobStatus::Active));
        assert!(filter.employer_id.is_none());
    }

    #[test]
    fn explicit_status_filter_is_kept() {
        let request = JobListRequest {
            filter: JobFilter {
                status: Some(JobStatus::Closed),
                ..JobFilter::default()
            },
            ..JobListRequest::default()
        };
        let filter = resolve_listing_filter(None, &request);
        assert_eq!(filter.status, Some(JobStatus::Closed));
    }

    #[test]
    fn employer_own_listing_sees_all_statuses() {
        let employer = user(UserRole::Employer);
        let request = JobListRequest {
            my_jobs: true,
            ..JobListRequest::default()
        };
        let filter = resolve_listing_filter(Some(&employer), &request);
        assert_eq!(filter.status, None);
        assert_eq!(filter.employer_id, Some(employer.id));
    }

    #[test]
    fn my_jobs_is_ignored_for_jobseekers() {
        let seeker = user(UserRole::Jobseeker);
        let request = JobListRequest {
            my_jobs: true,
            ..JobListRequest::default()
        };
        let filter = resolve_listing_filter(Some(&seeker), &request);
        assert_eq!(filter.status, Some(JobStatus::Active));
        assert!(filter.employer_id.is_none());
    }

    #[test]
    fn employer_filter_from_client_is_never_trusted() {
        // A caller cannot scope a public listing to an arbitrary employer
        // while skipping the active-only default.
        let request = JobListRequest {
            filter: JobFilter {
                employer_id: Some(UserId::new()),
                ..JobFilter::default()
            },
            ..JobListRequest::default()
        };
        let filter = resolve_listing_filter(None, &request);
        assert!(filter.employer_id.is_none());
        assert_eq!(filter.status, Some(JobStatus::Active));
    }
}
