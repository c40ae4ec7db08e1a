//! Application review status.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Review status of a job application.
///
/// The service accepts any of the five values from any current state: the
/// check is set membership, not a strict forward-only sequence. `Rejected`
/// and `Hired` are terminal by convention only; the data layer does not
/// forbid moving out of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted, not yet looked at. The initial state.
    #[default]
    Pending,
    /// Seen by the employer.
    Reviewed,
    /// Selected for the next round.
    Shortlisted,
    /// Turned down.
    Rejected,
    /// Offer accepted.
    Hired,
}

impl ApplicationStatus {
    /// All valid statuses, in conventional workflow order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Reviewed,
        Self::Shortlisted,
        Self::Rejected,
        Self::Hired,
    ];

    /// Parses the lowercase wire form. Returns `None` for anything outside
    /// the five-element set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "reviewed" => Some(Self::Reviewed),
            "shortlisted" => Some(Self::Shortlisted),
            "rejected" => Some(Self::Rejected),
            "hired" => Some(Self::Hired),
            _ => None,
        }
    }

    /// Lowercase wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Hired => "hired",
        }
    }

    /// Whether setting this status stamps `reviewed_at`: every status
    /// except `Pending` counts as having been reviewed.
    #[must_use]
    pub const fn marks_reviewed(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Terminal by convention (not enforced as non-reversible).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Hired)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_all_five_values() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn parse_rejects_anything_else() {
        assert_eq!(ApplicationStatus::parse("accepted"), None);
        assert_eq!(ApplicationStatus::parse("PENDING"), None);
        assert_eq!(ApplicationStatus::parse(""), None);
        assert_eq!(ApplicationStatus::parse("pending "), None);
    }

    #[test]
    fn initial_state_is_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
    }

    #[test]
    fn every_status_but_pending_marks_reviewed() {
        assert!(!ApplicationStatus::Pending.marks_reviewed());
        assert!(ApplicationStatus::Reviewed.marks_reviewed());
        assert!(ApplicationStatus::Shortlisted.marks_reviewed());
        assert!(ApplicationStatus::Rejected.marks_reviewed());
        assert!(ApplicationStatus::Hired.marks_reviewed());
    }

    #[test]
    fn terminal_states_are_rejected_and_hired() {
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(ApplicationStatus::Hired.is_terminal());
        assert!(!ApplicationStatus::Shortlisted.is_terminal());
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&ApplicationStatus::Shortlisted).ok();
        assert_eq!(json, Some("\"shortlisted\"".to_string()));
        assert_eq!(
            serde_json::from_str::<ApplicationStatus>("\"hired\"").ok(),
            Some(ApplicationStatus::Hired)
        );
    }
}
