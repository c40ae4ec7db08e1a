//! Analytics storage: the append-only event log and the aggregation
//! queries behind overview, timeseries, and top-jobs.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{AnalyticsEventRecord, DayCountRow, StatusCountRow, TopJobRow};
use crate::domain::{JobId, UserId};
use crate::error::ApiError;

/// Fields for one tracked event. Everything except the name is optional.
#[derive(Debug, Clone, Default)]
pub struct NewAnalyticsEvent {
    /// Event name discriminator.
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
    /// Arbitrary JSON metadata.
    pub metadata: serde_json::Value,
}

/// PostgreSQL-backed analytics store.
#[derive(Debug, Clone)]
pub struct AnalyticsStore {
    pool: PgPool,
}

impl AnalyticsStore {
    /// Creates a new store over the shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends one event and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on failure.
    pub async fn insert_event(
        &self,
        new: &NewAnalyticsEvent,
    ) -> Result<AnalyticsEventRecord, ApiError> {
        let metadata = if new.metadata.is_null() {
            serde_json::json!({})
        } else {
            new.metadata.clone()
        };
        let row = sqlx::query_as::<_, AnalyticsEventRecord>(
            "INSERT INTO analytics_events \
               (event_name, user_id, job_id, session_id, page, referrer, user_agent, ip, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&new.event_name)
        .bind(new.user_id)
        .bind(new.job_id)
        .bind(&new.session_id)
        .bind(&new.page)
        .bind(&new.referrer)
        .bind(&new.user_agent)
        .bind(&new.ip)
        .bind(sqlx::types::Json(metadata))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Counts jobs created since `since`, optionally scoped to one
    /// employer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn count_jobs_since(
        &self,
        since: DateTime<Utc>,
        employer_id: Option<UserId>,
    ) -> Result<i64, ApiError> {
        let mut query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs WHERE created_at >= ");
        query.push_bind(since);
        if let Some(employer_id) = employer_id {
            query.push(" AND employer_id = ");
            query.push_bind(employer_id);
        }
        Ok(query.build_query_scalar().fetch_one(&self.pool).await?)
    }

    /// Counts applications created since `since`, optionally scoped to an
    /// employer or an applicant.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn count_applications_since(
        &self,
        since: DateTime<Utc>,
        employer_id: Option<UserId>,
        applicant_id: Option<UserId>,
    ) -> Result<i64, ApiError> {
        let mut query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM applications WHERE created_at >= ");
        query.push_bind(since);
        push_application_scope(&mut query, employer_id, applicant_id);
        Ok(query.build_query_scalar().fetch_one(&self.pool).await?)
    }

    /// Counts users registered since `since`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn count_users_since(&self, since: DateTime<Utc>) -> Result<i64, ApiError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Counts events that occurred since `since`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn count_events_since(&self, since: DateTime<Utc>) -> Result<i64, ApiError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM analytics_events WHERE occurred_at >= $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }

    /// Application counts grouped by status since `since`, with the same
    /// optional scoping as [`Self::count_applications_since`]. Statuses
    /// with zero applications are absent from the result; the service
    /// fills them in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn applications_by_status_since(
        &self,
        since: DateTime<Utc>,
        employer_id: Option<UserId>,
        applicant_id: Option<UserId>,
    ) -> Result<Vec<StatusCountRow>, ApiError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT status, COUNT(*) AS count FROM applications WHERE created_at >= ",
        );
        query.push_bind(since);
        push_application_scope(&mut query, employer_id, applicant_id);
        query.push(" GROUP BY status");
        Ok(query
            .build_query_as::<StatusCountRow>()
            .fetch_all(&self.pool)
            .await?)
    }

    /// Applications per calendar day since `since`, ascending, only days
    /// with at least one row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn applications_per_day(
        &self,
        since: DateTime<Utc>,
        employer_id: Option<UserId>,
        applicant_id: Option<UserId>,
    ) -> Result<Vec<DayCountRow>, ApiError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT date_trunc('day', created_at)::date AS day, COUNT(*) AS count \
             FROM applications WHERE created_at >= ",
        );
        query.push_bind(since);
        push_application_scope(&mut query, employer_id, applicant_id);
        query.push(" GROUP BY day ORDER BY day ASC");
        Ok(query
            .build_query_as::<DayCountRow>()
            .fetch_all(&self.pool)
            .await?)
    }

    /// Jobs posted per calendar day since `since`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn jobs_per_day(
        &self,
        since: DateTime<Utc>,
        employer_id: Option<UserId>,
    ) -> Result<Vec<DayCountRow>, ApiError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT date_trunc('day', created_at)::date AS day, COUNT(*) AS count \
             FROM jobs WHERE created_at >= ",
        );
        query.push_bind(since);
        if let Some(employer_id) = employer_id {
            query.push(" AND employer_id = ");
            query.push_bind(employer_id);
        }
        query.push(" GROUP BY day ORDER BY day ASC");
        Ok(query
            .build_query_as::<DayCountRow>()
            .fetch_all(&self.pool)
            .await?)
    }

    /// Users registered per calendar day since `since`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn users_per_day(&self, since: DateTime<Utc>) -> Result<Vec<DayCountRow>, ApiError> {
        let rows = sqlx::query_as::<_, DayCountRow>(
            "SELECT date_trunc('day', created_at)::date AS day, COUNT(*) AS count \
             FROM users WHERE created_at >= $1 GROUP BY day ORDER BY day ASC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Events per calendar day since `since`, bucketed on `occurred_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn events_per_day(&self, since: DateTime<Utc>) -> Result<Vec<DayCountRow>, ApiError> {
        let rows = sqlx::query_as::<_, DayCountRow>(
            "SELECT date_trunc('day', occurred_at)::date AS day, COUNT(*) AS count \
             FROM analytics_events WHERE occurred_at >= $1 GROUP BY day ORDER BY day ASC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Jobs ranked by all-time application count descending, optionally
    /// scoped to one employer, with job details joined in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] on query failure.
    pub async fn top_jobs(
        &self,
        limit: i64,
        employer_id: Option<UserId>,
    ) -> Result<Vec<TopJobRow>, ApiError> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT j.*, COUNT(a.id) AS total_applications \
             FROM applications a JOIN jobs j ON j.id = a.job_id WHERE TRUE",
        );
        if let Some(employer_id) = employer_id {
            query.push(" AND a.employer_id = ");
            query.push_bind(employer_id);
        }
        query.push(" GROUP BY j.id ORDER BY total_applications DESC LIMIT ");
        query.push_bind(limit);
        Ok(query
            .build_query_as::<TopJobRow>()
            .fetch_all(&self.pool)
            .await?)
    }
}

/// Appends the employer/applicant scope clauses shared by the application
/// aggregation queries.
fn push_application_scope(
    query: &mut QueryBuilder<'_, Postgres>,
    employer_id: Option<UserId>,
    applicant_id: Option<UserId>,
) {
    if let Some(employer_id) = employer_id {
        query.push(" AND employer_id = ");
        query.push_bind(employer_id);
    }
    if let Some(applicant_id) = applicant_id {
        query.push(" AND applicant_id = ");
        query.push_bind(applicant_id);
    }
}
