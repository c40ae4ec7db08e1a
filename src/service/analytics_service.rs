//! Usage analytics: event recording and the overview / timeseries /
//! top-jobs aggregations, scoped to the acting user.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ApplicationStatus, UserId, UserRole};
use crate::error::ApiError;
use crate::persistence::models::{DayCountRow, StatusCountRow, TopJobRow, UserRecord};
use crate::persistence::{AnalyticsStore, NewAnalyticsEvent};

/// Default trailing window for the overview endpoint.
const DEFAULT_RANGE_DAYS: i64 = 7;
/// Top-jobs result size bounds.
const TOP_JOBS_MAX: i64 = 50;
const TOP_JOBS_DEFAULT: i64 = 5;

/// Visibility scope derived from the actor's role.
///
/// Admins see everything; employers see their own jobs and the
/// applications against them; jobseekers see their own applications
/// (jobs and events are public-scope counts for everyone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Unrestricted (admin).
    Global,
    /// Restricted to one employer's jobs and applications.
    Employer(UserId),
    /// Restricted to one applicant's applications.
    Applicant(UserId),
}

impl Scope {
    /// Derives the scope for an actor.
    #[must_use]
    pub fn for_actor(actor: &UserRecord) -> Self {
        match actor.role {
            UserRole::Admin => Self::Global,
            UserRole::Employer => Self::Employer(actor.id),
            UserRole::Jobseeker => Self::Applicant(actor.id),
        }
    }

    /// Employer filter for job queries.
    #[must_use]
    pub const fn employer_filter(&self) -> Option<UserId> {
        match self {
            Self::Employer(id) => Some(*id),
            Self::Global | Self::Applicant(_) => None,
        }
    }

    /// Applicant filter for application queries.
    #[must_use]
    pub const fn applicant_filter(&self) -> Option<UserId> {
        match self {
            Self::Applicant(id) => Some(*id),
            Self::Global | Self::Employer(_) => None,
        }
    }
}

/// Metric selector for the timeseries endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Applications submitted per day.
    Applications,
    /// Jobs posted per day.
    Jobs,
    /// Users registered per day.
    Users,
    /// Events recorded per day.
    Events,
}

impl Metric {
    /// Parses the wire form. Returns `None` outside the four-value set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "applications" => Some(Self::Applications),
            "jobs" => Some(Self::Jobs),
            "users" => Some(Self::Users),
            "events" => Some(Self::Events),
            _ => None,
        }
    }

    /// Lowercase wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applications => "applications",
            Self::Jobs => "jobs",
            Self::Users => "users",
            Self::Events => "events",
        }
    }
}

/// Application counts per status with every status always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusBreakdown {
    /// Pending applications.
    pub pending: i64,
    /// Reviewed applications.
    pub reviewed: i64,
    /// Shortlisted applications.
    pub shortlisted: i64,
    /// Rejected applications.
    pub rejected: i64,
    /// Hired applications.
    pub hired: i64,
}

impl StatusBreakdown {
    /// Builds the breakdown from grouped rows, filling absent statuses
    /// with zero.
    #[must_use]
    pub fn from_rows(rows: &[StatusCountRow]) -> Self {
        let mut breakdown = Self::default();
        for row in rows {
            match row.status {
                ApplicationStatus::Pending => breakdown.pending = row.count,
                ApplicationStatus::Reviewed => breakdown.reviewed = row.count,
                ApplicationStatus::Shortlisted => breakdown.shortlisted = row.count,
                ApplicationStatus::Rejected => breakdown.rejected = row.count,
                ApplicationStatus::Hired => breakdown.hired = row.count,
            }
        }
        breakdown
    }
}

/// Overview metrics for a trailing window.
#[derive(Debug, Clone)]
pub struct Overview {
    /// Users registered in range; admin scope only, zero otherwise.
    pub total_users: i64,
    /// Jobs created in range, within scope.
    pub jobs_in_range: i64,
    /// Applications created in range, within scope.
    pub applications_in_range: i64,
    /// Events recorded in range.
    pub events_in_range: i64,
    /// Application counts by status, within scope.
    pub applications_by_status: StatusBreakdown,
    /// The window that was used, in days.
    pub range_days: i64,
}

/// Orchestrates analytics operations over the [`AnalyticsStore`].
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    analytics: AnalyticsStore,
}

impl AnalyticsService {
    /// Creates the service.
    #[must_use]
    pub fn new(analytics: AnalyticsStore) -> Self {
        Self { analytics }
    }

    /// Appends one tracked event.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for a blank event name.
    pub async fn record_event(
        &self,
        event: NewAnalyticsEvent,
    ) -> Result<crate::persistence::models::AnalyticsEventRecord, ApiError> {
        if event.event_name.trim().is_empty() {
            return Err(ApiError::validation("eventName is required"));
        }
        self.analytics.insert_event(&event).await
    }

    /// Computes the overview metrics for the actor's scope over a
    /// trailing window.
    ///
    /// # Errors
    ///
    /// [`ApiError::Database`] on query failure.
    pub async fn overview(
        &self,
        actor: &UserRecord,
        range: Option<&str>,
    ) -> Result<Overview, ApiError> {
        let range_days = parse_range_days(range, DEFAULT_RANGE_DAYS);
        let since = Utc::now() - chrono::Duration::days(range_days);
        let scope = Scope::for_actor(actor);
        let employer = scope.employer_filter();
        let applicant = scope.applicant_filter();

        let total_users = if scope == Scope::Global {
            self.analytics.count_users_since(since).await?
        } else {
            0
        };
        let jobs_in_range = self.analytics.count_jobs_since(since, employer).await?;
        let applications_in_range = self
            .analytics
            .count_applications_since(since, employer, applicant)
            .await?;
        let events_in_range = self.analytics.count_events_since(since).await?;
        let status_rows = self
            .analytics
            .applications_by_status_since(since, employer, applicant)
            .await?;

        Ok(Overview {
            total_users,
            jobs_in_range,
            applications_in_range,
            events_in_range,
            applications_by_status: StatusBreakdown::from_rows(&status_rows),
            range_days,
        })
    }

    /// Buckets the chosen metric by calendar day over a trailing window.
    /// Only days with at least one row appear, ascending by date.
    ///
    /// # Errors
    ///
    /// [`ApiError::Database`] on query failure.
    pub async fn timeseries(
        &self,
        actor: &UserRecord,
        metric: Metric,
        range: Option<&str>,
    ) -> Result<(Vec<DayCountRow>, i64), ApiError> {
        let range_days = parse_range_days(range, 30);
        let since = Utc::now() - chrono::Duration::days(range_days);
        let scope = Scope::for_actor(actor);

        let rows = match metric {
            Metric::Applications => {
                self.analytics
                    .applications_per_day(since, scope.employer_filter(), scope.applicant_filter())
                    .await?
            }
            Metric::Jobs => {
                self.analytics
                    .jobs_per_day(since, scope.employer_filter())
                    .await?
            }
            Metric::Users => self.analytics.users_per_day(since).await?,
            Metric::Events => self.analytics.events_per_day(since).await?,
        };
        Ok((rows, range_days))
    }

    /// Ranks jobs by application count within the actor's scope.
    ///
    /// # Errors
    ///
    /// [`ApiError::Database`] on query failure.
    pub async fn top_jobs(
        &self,
        actor: &UserRecord,
        limit: Option<i64>,
    ) -> Result<Vec<TopJobRow>, ApiError> {
        let limit = limit.unwrap_or(TOP_JOBS_DEFAULT).clamp(1, TOP_JOBS_MAX);
        let scope = Scope::for_actor(actor);
        self.analytics.top_jobs(limit, scope.employer_filter()).await
    }
}

/// Parses a range such as `"30d"` or `"30"` into days, falling back to
/// `default` for missing, malformed, or non-positive values.
#[must_use]
pub fn parse_range_days(range: Option<&str>, default: i64) -> i64 {
    let Some(range) = range else {
        return default;
    };
    let digits = range.strip_suffix('d').unwrap_or(range);
    match digits.parse::<i64>() {
        Ok(n) if n > 0 => n,
        _ => default,
    }
}

/// Converts a result timestamp for the timeseries wire format.
#[must_use]
pub fn format_day(day: chrono::NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Days-window start helper used by tests and handlers alike.
#[must_use]
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - chrono::Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn range_parses_suffixed_and_bare_forms() {
        assert_eq!(parse_range_days(Some("30d"), 7), 30);
        assert_eq!(parse_range_days(Some("14"), 7), 14);
        assert_eq!(parse_range_days(None, 7), 7);
    }

    #[test]
    fn range_falls_back_on_garbage() {
        assert_eq!(parse_range_days(Some("soon"), 7), 7);
        assert_eq!(parse_range_days(Some("-3d"), 7), 7);
        assert_eq!(parse_range_days(Some("0"), 7), 7);
        assert_eq!(parse_range_days(Some(""), 7), 7);
    }

    #[test]
    fn metric_parse_covers_exactly_four_values() {
        assert_eq!(Metric::parse("applications"), Some(Metric::Applications));
        assert_eq!(Metric::parse("jobs"), Some(Metric::Jobs));
        assert_eq!(Metric::parse("users"), Some(Metric::Users));
        assert_eq!(Metric::parse("events"), Some(Metric::Events));
        assert_eq!(Metric::parse("sessions"), None);
        assert_eq!(Metric::parse("Jobs"), None);
    }

    #[test]
    fn breakdown_fills_missing_statuses_with_zero() {
        let rows = vec![
            StatusCountRow {
                status: ApplicationStatus::Pending,
                count: 4,
            },
            StatusCountRow {
                status: ApplicationStatus::Hired,
                count: 1,
            },
        ];
        let breakdown = StatusBreakdown::from_rows(&rows);
        assert_eq!(breakdown.pending, 4);
        assert_eq!(breakdown.hired, 1);
        assert_eq!(breakdown.reviewed, 0);
        assert_eq!(breakdown.shortlisted, 0);
        assert_eq!(breakdown.rejected, 0);
    }

    #[test]
    fn scope_follows_role() {
        let mut actor = crate::persistence::models::UserRecord {
            id: UserId::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password_hash: String::new(),
            role: UserRole::Admin,
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
        };
        assert_eq!(Scope::for_actor(&actor), Scope::Global);

        actor.role = UserRole::Employer;
        let scope = Scope::for_actor(&actor);
        assert_eq!(scope.employer_filter(), Some(actor.id));
        assert_eq!(scope.applicant_filter(), None);

        actor.role = UserRole::Jobseeker;
        let scope = Scope::for_actor(&actor);
        assert_eq!(scope.employer_filter(), None);
        assert_eq!(scope.applicant_filter(), Some(actor.id));
    }

    #[test]
    fn day_formats_as_iso_date() {
        let Some(day) = NaiveDate::from_ymd_opt(2024, 3, 9) else {
            unreachable!()
        };
        assert_eq!(format_day(day), "2024-03-09");
    }
}
