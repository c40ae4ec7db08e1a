//! Application storage: submission, joined listings, and status updates.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{ApplicationListRow, ApplicationRecord, DocumentLink};
use crate::domain::{ApplicationId, ApplicationStatus, JobId, UserId};
use crate::error::ApiError;

/// Joined column list shared by every application listing query.
const LIST_COLUMNS: &str = "a.*, \
    j.title AS job_title, j.company AS job_company, j.location AS job_location, \
    j.job_type AS job_employment_type, j.status AS job_status, \
    u.first_name AS applicant_first_name, u.last_name AS applicant_last_name, \
    u.email AS applicant_email, u.avatar AS applicant_avatar";

/// Fields required to insert a new application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    /// Pre-generated primary key.
    pub id: ApplicationId,
    /// Applied-to job.
    pub job_id: JobId,
    /// Applying user.
    pub applicant_id: UserId,
    /// Job owner, denormalized from the job.
    pub employer_id: UserId,
    /// Optional cover letter.
    pub cover_letter: Option<String>,
    /// Resume link.
    pub resume_url: String,
    /// Extra documents.
    pub additional_documents: Vec<DocumentLink>,
}

/// Listing filter for the three application views. All fields are
/// conjunctive; `None` means "no filter".
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationFilter {
    /// Restrict to one applicant's submissions.
    pub applicant_id: Option<UserId>,
    /// Restrict to one job.
    pub job_id: Option<JobId>,
    /// Restrict to one employer's jobs (via the denormalized reference).
    pub employer_id: Option<UserId>,
    /// Restrict to one review status.
    pub status: Option<ApplicationStatus>,
}

/// PostgreSQL-backed application store.
#[derive(Debug, Clone)]
pub struct ApplicationStore {
    pool: PgPool,
}

impl ApplicationStore {
    /// Creates a new store over the shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new application and returns the stored row.
    ///
    /// The `(job_id, applicant_id)` unique index is the authoritative
    /// duplicate guard; under a concurrent duplicate apply the losing
    /// insert fails with a unique violation which the service translates
    /// to a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on failure.
    pub async fn insert(&self, new: &NewApplication) -> Result<ApplicationRecord, ApiError> {
        let row = sqlx::query_as::<_, ApplicationRecord>(
            "INSERT INTO applications \
               (id, job_id, applicant_id, employer_id, cover_letter, resume_url, \
                additional_documents) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(new.id)
        .bind(new.job_id)
        .bind(new.applicant_id)
        .bind(new.employer_id)
        .bind(&new.cover_letter)
        .bind(&new.resume_url)
        .bind(sqlx::types::Json(&new.additional_documents))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Looks up an application by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_by_id(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, ApiError> {
        let row = sqlx::query_as::<_, ApplicationRecord>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Advisory pre-check for a duplicate apply. The unique index remains
    /// the authoritative guard under races.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn exists_for(&self, job_id: JobId, applicant_id: UserId) -> Result<bool, ApiError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE job_id = $1 AND applicant_id = $2)",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Returns one page of applications matching `filter`, newest first,
    /// each joined with job and applicant summaries, plus the total match
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list(
        &self,
        filter: &ApplicationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ApplicationListRow>, i64), ApiError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {LIST_COLUMNS} FROM applications a \
             JOIN jobs j ON j.id = a.job_id \
             JOIN users u ON u.id = a.applicant_id"
        ));
        push_filter_clauses(&mut query, filter);
        query.push(" ORDER BY a.created_at DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);
        let items = query
            .build_query_as::<ApplicationListRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM applications a");
        push_filter_clauses(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((items, total))
    }

    /// Sets the review status, optionally replaces the notes, and stamps
    /// `reviewed_at` when `mark_reviewed` is set. Returns the updated
    /// row, or `None` if the application no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        notes: Option<&str>,
        mark_reviewed: bool,
    ) -> Result<Option<ApplicationRecord>, ApiError> {
        let row = sqlx::query_as::<_, ApplicationRecord>(
            "UPDATE applications SET \
               status = $2, \
               notes = COALESCE($3, notes), \
               reviewed_at = CASE WHEN $4 THEN now() ELSE reviewed_at END, \
               updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(notes)
        .bind(mark_reviewed)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

/// Appends the `WHERE` clauses for `filter`; shared by the listing and
/// count queries. All filter columns live on `applications`, so the count
/// query skips the joins.
fn push_filter_clauses(query: &mut QueryBuilder<'_, Postgres>, filter: &ApplicationFilter) {
    query.push(" WHERE TRUE");
    if let Some(applicant_id) = filter.applicant_id {
        query.push(" AND a.applicant_id = ");
        query.push_bind(applicant_id);
    }
    if let Some(job_id) = filter.job_id {
        query.push(" AND a.job_id = ");
        query.push_bind(job_id);
    }
    if let Some(employer_id) = filter.employer_id {
        query.push(" AND a.employer_id = ");
        query.push_bind(employer_id);
    }
    if let Some(status) = filter.status {
        query.push(" AND a.status = ");
        query.push_bind(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_adds_no_clauses() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM applications a");
        push_filter_clauses(&mut query, &ApplicationFilter::default());
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM applications a WHERE TRUE");
    }

    #[test]
    fn filters_bind_rather_than_interpolate() {
        let filter = ApplicationFilter {
            applicant_id: Some(UserId::new()),
            status: Some(ApplicationStatus::Pending),
            ..ApplicationFilter::default()
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM applications a");
        push_filter_clauses(&mut query, &filter);
        let sql = query.sql();
        assert!(sql.contains("a.applicant_id = $1"));
        assert!(sql.contains("a.status = $2"));
    }
}
