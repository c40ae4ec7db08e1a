//! Job posting enums and the salary value object.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "job_type", rename_all = "kebab-case")]
pub enum JobType {
    /// Full-time position.
    FullTime,
    /// Part-time position.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Internship.
    Internship,
    /// Fully remote position.
    Remote,
}

/// Lifecycle status of a posting. Deletion is a separate hard delete;
/// pausing or closing happens through this status instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepting applications. The default for new postings and the implied
    /// filter for unauthenticated listings.
    #[default]
    Active,
    /// Temporarily hidden from public listings.
    Paused,
    /// No longer accepting applications.
    Closed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Required experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "experience_level", rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// Entry level.
    Entry,
    /// Mid level.
    Mid,
    /// Senior level.
    Senior,
    /// Executive level.
    Executive,
}

/// Period a salary figure refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "salary_period", rename_all = "lowercase")]
pub enum SalaryPeriod {
    /// Per hour.
    Hourly,
    /// Per month.
    Monthly,
    /// Per year.
    #[default]
    Yearly,
}

/// Salary range advertised on a posting.
///
/// Stored as flat columns on the `jobs` table but nested as one object on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Salary {
    /// Lower bound, in whole currency units.
    #[serde(default)]
    pub min: Option<i64>,
    /// Upper bound, in whole currency units.
    #[serde(default)]
    pub max: Option<i64>,
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Period the figures refer to.
    #[serde(default)]
    pub period: SalaryPeriod,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for Salary {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            currency: default_currency(),
            period: SalaryPeriod::default(),
        }
    }
}

/// Sort orders accepted by the job listing endpoint.
///
/// Parsed from the original API's string form (`-createdAt` style); unknown
/// values fall back to newest-first rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    /// Newest postings first (default).
    #[default]
    NewestFirst,
    /// Oldest postings first.
    OldestFirst,
    /// Most viewed first.
    MostViewed,
    /// Most applied-to first.
    MostApplications,
}

impl JobSort {
    /// Parses the wire form (`"-createdAt"`, `"createdAt"`, `"-views"`,
    /// `"-applicationsCount"`). Unknown strings yield the default.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "createdAt" => Self::OldestFirst,
            "-views" => Self::MostViewed,
            "-applicationsCount" => Self::MostApplications,
            _ => Self::NewestFirst,
        }
    }

    /// `ORDER BY` clause for this sort. Fixed strings only, never
    /// interpolated from user input.
    #[must_use]
    pub const fn order_by(&self) -> &'static str {
        match self {
            Self::NewestFirst => "created_at DESC",
            Self::OldestFirst => "created_at ASC",
            Self::MostViewed => "views DESC",
            Self::MostApplications => "applications_count DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&JobType::FullTime).ok(),
            Some("\"full-time\"".to_string())
        );
        assert_eq!(
            serde_json::from_str::<JobType>("\"part-time\"").ok(),
            Some(JobType::PartTime)
        );
    }

    #[test]
    fn default_status_is_active() {
        assert_eq!(JobStatus::default(), JobStatus::Active);
    }

    #[test]
    fn salary_defaults_to_yearly_usd() {
        let salary = Salary::default();
        assert_eq!(salary.currency, "USD");
        assert_eq!(salary.period, SalaryPeriod::Yearly);
        assert!(salary.min.is_none());
    }

    #[test]
    fn sort_parses_wire_forms() {
        assert_eq!(JobSort::parse("-createdAt"), JobSort::NewestFirst);
        assert_eq!(JobSort::parse("createdAt"), JobSort::OldestFirst);
        assert_eq!(JobSort::parse("-views"), JobSort::MostViewed);
        assert_eq!(
            JobSort::parse("-applicationsCount"),
            JobSort::MostApplications
        );
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        assert_eq!(JobSort::parse("; DROP TABLE jobs"), JobSort::NewestFirst);
        assert_eq!(JobSort::parse(""), JobSort::NewestFirst);
    }
}
