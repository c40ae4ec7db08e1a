//! Analytics DTOs: event recording and aggregation responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{JobId, UserId};
use crate::persistence::models::{AnalyticsEventRecord, DayCountRow, TopJobRow};
use crate::service::analytics_service::{format_day, Overview, StatusBreakdown};

use super::job_dto::JobDto;

/// Request body for `POST /api/analytics/event`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventRequest {
    /// Event name discriminator (e.g. `"job_viewed"`).
    #[serde(default)]
    pub event_name: String,
    /// Related job, when applicable.
    #[serde(default)]
    pub job_id: Option<JobId>,
    /// Client session identifier.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Page path.
    #[serde(default)]
    pub page: Option<String>,
    /// Referrer URL.
    #[serde(default)]
    pub referrer: Option<String>,
    /// Client user agent; the request header is used when absent.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Client IP; the forwarding chain is used when absent.
    #[serde(default)]
    pub ip: Option<String>,
    /// Arbitrary metadata.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Response body for `POST /api/analytics/event`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Always `true`.
    pub success: bool,
    /// Stored event row ID.
    pub event_id: i64,
    /// When the event was recorded.
    pub occurred_at: DateTime<Utc>,
}

impl From<AnalyticsEventRecord> for EventResponse {
    fn from(record: AnalyticsEventRecord) -> Self {
        Self {
            success: true,
            event_id: record.id,
            occurred_at: record.occurred_at,
        }
    }
}

/// Query parameters for `GET /api/analytics/overview`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OverviewParams {
    /// Trailing window, e.g. `"7d"` or `"30"`. Defaults to 7 days.
    #[serde(default)]
    pub range: Option<String>,
}

/// Response body for `GET /api/analytics/overview`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    /// Always `true`.
    pub success: bool,
    /// The window that was used, in days.
    pub range_days: i64,
    /// Users registered in range (admin scope only).
    pub total_users: i64,
    /// Jobs created in range.
    pub jobs_in_range: i64,
    /// Applications created in range.
    pub applications_in_range: i64,
    /// Events recorded in range.
    pub events_in_range: i64,
    /// Application counts by status.
    pub applications_by_status: StatusBreakdown,
}

impl From<Overview> for OverviewResponse {
    fn from(overview: Overview) -> Self {
        Self {
            success: true,
            range_days: overview.range_days,
            total_users: overview.total_users,
            jobs_in_range: overview.jobs_in_range,
            applications_in_range: overview.applications_in_range,
            events_in_range: overview.events_in_range,
            applications_by_status: overview.applications_by_status,
        }
    }
}

/// Query parameters for `GET /api/analytics/timeseries`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TimeseriesParams {
    /// Metric selector: `applications`, `jobs`, `users`, or `events`.
    #[serde(default)]
    pub metric: Option<String>,
    /// Trailing window, e.g. `"30d"`. Defaults to 30 days.
    #[serde(default)]
    pub range: Option<String>,
}

/// One day bucket in a timeseries. Days without rows are omitted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayBucketDto {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Row count for that day.
    pub count: i64,
}

impl From<DayCountRow> for DayBucketDto {
    fn from(row: DayCountRow) -> Self {
        Self {
            date: format_day(row.day),
            count: row.count,
        }
    }
}

/// Response body for `GET /api/analytics/timeseries`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesResponse {
    /// Always `true`.
    pub success: bool,
    /// Metric the series describes.
    pub metric: String,
    /// The window that was used, in days.
    pub range_days: i64,
    /// Ascending day buckets.
    pub series: Vec<DayBucketDto>,
}

/// Query parameters for `GET /api/analytics/top-jobs`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TopJobsParams {
    /// Result size, clamped to `1..=50`. Defaults to 5.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// One ranked job in the top-jobs response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopJobDto {
    /// The posting.
    pub job: JobDto,
    /// Applications received, all time.
    pub total_applications: i64,
}

impl From<TopJobRow> for TopJobDto {
    fn from(row: TopJobRow) -> Self {
        Self {
            job: row.job.into(),
            total_applications: row.total_applications,
        }
    }
}

/// Response body for `GET /api/analytics/top-jobs`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TopJobsResponse {
    /// Always `true`.
    pub success: bool,
    /// Ranked jobs, most applications first.
    pub items: Vec<TopJobDto>,
}

/// Builds an event insert from the request. Caller-supplied user agent
/// and IP win; the connection-derived values gathered by the handler
/// fill in only when the body omits them.
#[must_use]
pub fn into_new_event(
    request: RecordEventRequest,
    user_id: Option<UserId>,
    header_user_agent: Option<String>,
    header_ip: Option<String>,
) -> crate::persistence::NewAnalyticsEvent {
    crate::persistence::NewAnalyticsEvent {
        event_name: request.event_name,
        user_id,
        job_id: request.job_id,
        session_id: request.session_id,
        page: request.page,
        referrer: request.referrer,
        user_agent: request.user_agent.or(header_user_agent),
        ip: request.ip.or(header_ip),
        metadata: request.metadata.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(user_agent: Option<&str>, ip: Option<&str>) -> RecordEventRequest {
        RecordEventRequest {
            event_name: "job_viewed".to_string(),
            job_id: None,
            session_id: None,
            page: None,
            referrer: None,
            user_agent: user_agent.map(str::to_string),
            ip: ip.map(str::to_string),
            metadata: None,
        }
    }

    #[test]
    fn body_supplied_agent_and_ip_win_over_headers() {
        let request = request_with(Some("custom-agent"), Some("198.51.100.9"));
        let event = into_new_event(
            request,
            None,
            Some("header-agent".to_string()),
            Some("203.0.113.1".to_string()),
        );
        assert_eq!(event.user_agent.as_deref(), Some("custom-agent"));
        assert_eq!(event.ip.as_deref(), Some("198.51.100.9"));
    }

    #[test]
    fn headers_fill_in_when_body_omits_them() {
        let event = into_new_event(
            request_with(None, None),
            None,
            Some("header-agent".to_string()),
            Some("203.0.113.1".to_string()),
        );
        assert_eq!(event.user_agent.as_deref(), Some("header-agent"));
        assert_eq!(event.ip.as_deref(), Some("203.0.113.1"));
        assert!(event.metadata.is_null());
    }
}
