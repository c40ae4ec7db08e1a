//! Job storage: CRUD, filtered listing, and best-effort counters.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::JobRecord;
use crate::domain::{ExperienceLevel, JobId, JobSort, JobStatus, JobType, Salary, UserId};
use crate::error::ApiError;

/// Fields required to insert a new job posting.
#[derive(Debug, Clone)]
pub struct NewJob {
    /// Pre-generated primary key.
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
    /// Initial lifecycle status.
    pub status: JobStatus,
    /// Featured flag.
    pub featured: bool,
    /// Application deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Required experience level.
    pub experience: ExperienceLevel,
}

/// Allow-listed mutable job fields. `None` leaves the column untouched;
/// anything outside this struct simply cannot be mass-assigned.
#[derive(Debug, Clone, Default)]
pub struct JobChanges {
    /// Posting title.
    pub title: Option<String>,
    /// Posting body.
    pub description: Option<String>,
    /// Hiring company name.
    pub company: Option<String>,
    /// Job location.
    pub location: Option<String>,
    /// Employment type.
    pub job_type: Option<JobType>,
    /// Listing category.
    pub category: Option<String>,
    /// Salary range; replaces all four salary columns when present.
    pub salary: Option<Salary>,
    /// Ordered requirement lines.
    pub requirements: Option<Vec<String>>,
    /// Skill tags.
    pub skills: Option<Vec<String>>,
    /// Benefit lines.
    pub benefits: Option<Vec<String>>,
    /// Lifecycle status.
    pub status: Option<JobStatus>,
    /// Featured flag.
    pub featured: Option<bool>,
    /// Application deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Required experience level.
    pub experience: Option<ExperienceLevel>,
}

/// Listing filter. All fields are conjunctive; `None` means "no filter".
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Free-text search across title, company, and description.
    pub q: Option<String>,
    /// Employment type.
    pub job_type: Option<JobType>,
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive location substring.
    pub location: Option<String>,
    /// Experience level.
    pub experience: Option<ExperienceLevel>,
    /// Lifecycle status. The service layer decides the default.
    pub status: Option<JobStatus>,
    /// Restrict to one employer's postings.
    pub employer_id: Option<UserId>,
}

/// PostgreSQL-backed job store.
#[derive(Debug, Clone)]
pub struct JobStore {
    pool: PgPool,
}

impl JobStore {
    /// Creates a new store over the shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new job and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on failure.
    pub async fn insert(&self, new: &NewJob) -> Result<JobRecord, ApiError> {
        let row = sqlx::query_as::<_, JobRecord>(
            "INSERT INTO jobs (id, title, description, company, location, job_type, category, \
               salary_min, salary_max, salary_currency, salary_period, requirements, skills, \
               benefits, employer_id, status, featured, deadline, experience) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
               $17, $18, $19) \
             RETURNING *",
        )
        .bind(new.id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.company)
        .bind(&new.location)
        .bind(new.job_type)
        .bind(&new.category)
        .bind(new.salary.min)
        .bind(new.salary.max)
        .bind(&new.salary.currency)
        .bind(new.salary.period)
        .bind(&new.requirements)
        .bind(&new.skills)
        .bind(&new.benefits)
        .bind(new.employer_id)
        .bind(new.status)
        .bind(new.featured)
        .bind(new.deadline)
        .bind(new.experience)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Looks up a job by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn find_by_id(&self, id: JobId) -> Result<Option<JobRecord>, ApiError> {
        let row = sqlx::query_as::<_, JobRecord>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Returns one page of jobs matching `filter` plus the total match
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn list(
        &self,
        filter: &JobFilter,
        sort: JobSort,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<JobRecord>, i64), ApiError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM jobs");
        push_filter_clauses(&mut query, filter);
        query.push(" ORDER BY ");
        query.push(sort.order_by());
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);
        let items = query
            .build_query_as::<JobRecord>()
            .fetch_all(&self.pool)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs");
        push_filter_clauses(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((items, total))
    }

    /// Applies allow-listed changes and returns the updated row, or
    /// `None` if the job no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn update(
        &self,
        id: JobId,
        changes: &JobChanges,
    ) -> Result<Option<JobRecord>, ApiError> {
        let salary = changes.salary.as_ref();
        let row = sqlx::query_as::<_, JobRecord>(
            "UPDATE jobs SET \
               title = COALESCE($2, title), \
               description = COALESCE($3, description), \
               company = COALESCE($4, company), \
               location = COALESCE($5, location), \
               job_type = COALESCE($6, job_type), \
               category = COALESCE($7, category), \
               salary_min = CASE WHEN $8 THEN $9 ELSE salary_min END, \
               salary_max = CASE WHEN $8 THEN $10 ELSE salary_max END, \
               salary_currency = CASE WHEN $8 THEN $11 ELSE salary_currency END, \
               salary_period = CASE WHEN $8 THEN $12 ELSE salary_period END, \
               requirements = COALESCE($13, requirements), \
               skills = COALESCE($14, skills), \
               benefits = COALESCE($15, benefits), \
               status = COALESCE($16, status), \
               featured = COALESCE($17, featured), \
               deadline = COALESCE($18, deadline), \
               experience = COALESCE($19, experience), \
               updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.company)
        .bind(&changes.location)
        .bind(changes.job_type)
        .bind(&changes.category)
        .bind(salary.is_some())
        .bind(salary.and_then(|s| s.min))
        .bind(salary.and_then(|s| s.max))
        .bind(salary.map(|s| s.currency.clone()))
        .bind(salary.map(|s| s.period))
        .bind(&changes.requirements)
        .bind(&changes.skills)
        .bind(&changes.benefits)
        .bind(changes.status)
        .bind(changes.featured)
        .bind(changes.deadline)
        .bind(changes.experience)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Hard-deletes a job. Returns `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn delete(&self, id: JobId) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increments the view counter by one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure. Callers treat
    /// this as best-effort and only log the failure.
    pub async fn increment_views(&self, id: JobId) -> Result<(), ApiError> {
        sqlx::query("UPDATE jobs SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Increments the application counter by one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure. Callers treat
    /// this as best-effort and only log the failure.
    pub async fn increment_applications(&self, id: JobId) -> Result<(), ApiError> {
        sqlx::query("UPDATE jobs SET applications_count = applications_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Appends the `WHERE` clauses for `filter` to both the listing and the
/// count query so the two can never disagree.
fn push_filter_clauses(query: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    query.push(" WHERE TRUE");
    if let Some(status) = filter.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }
    if let Some(employer_id) = filter.employer_id {
        query.push(" AND employer_id = ");
        query.push_bind(employer_id);
    }
    if let Some(job_type) = filter.job_type {
        query.push(" AND job_type = ");
        query.push_bind(job_type);
    }
    if let Some(category) = &filter.category {
        query.push(" AND category = ");
        query.push_bind(category.clone());
    }
    if let Some(experience) = filter.experience {
        query.push(" AND experience = ");
        query.push_bind(experience);
    }
    if let Some(location) = &filter.location {
        query.push(" AND location ILIKE ");
        query.push_bind(format!("%{location}%"));
    }
    if let Some(q) = &filter.q {
        let pattern = format!("%{q}%");
        query.push(" AND (title ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR company ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR description ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_of(filter: &JobFilter) -> String {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM jobs");
        push_filter_clauses(&mut query, filter);
        query.sql().to_string()
    }

    #[test]
    fn empty_filter_adds_no_clauses() {
        let sql = sql_of(&JobFilter::default());
        assert_eq!(sql, "SELECT * FROM jobs WHERE TRUE");
    }

    #[test]
    fn search_token_is_bound_not_interpolated() {
        let filter = JobFilter {
            q: Some("'; DROP TABLE jobs; --".to_string()),
            ..JobFilter::default()
        };
        let sql = sql_of(&filter);
        assert!(!sql.contains("DROP TABLE"));
        assert!(sql.contains("title ILIKE $1"));
    }

    #[test]
    fn all_filters_produce_conjunctive_clauses() {
        let filter = JobFilter {
            q: Some("rust".to_string()),
            job_type: Some(JobType::Remote),
            category: Some("engineering".to_string()),
            location: Some("berlin".to_string()),
            experience: Some(ExperienceLevel::Senior),
            status: Some(JobStatus::Active),
            employer_id: Some(UserId::new()),
        };
        let sql = sql_of(&filter);
        assert!(sql.contains("status ="));
        assert!(sql.contains("employer_id ="));
        assert!(sql.contains("job_type ="));
        assert!(sql.contains("category ="));
        assert!(sql.contains("experience ="));
        assert!(sql.contains("location ILIKE"));
        assert!(sql.contains("description ILIKE"));
    }
}
