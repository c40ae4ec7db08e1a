//! User roles.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role attached to every user account.
///
/// Employers (and admins) own job postings; jobseekers apply to them.
/// Admins pass every ownership check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema, Default,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    /// Applies to jobs and bookmarks them.
    #[default]
    Jobseeker,
    /// Posts jobs and reviews applications.
    Employer,
    /// Full access to every resource.
    Admin,
}

impl UserRole {
    /// Lowercase wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jobseeker => "jobseeker",
            Self::Employer => "employer",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may create and manage job postings.
    #[must_use]
    pub const fn can_post_jobs(&self) -> bool {
        matches!(self, Self::Employer | Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_jobseeker() {
        assert_eq!(UserRole::default(), UserRole::Jobseeker);
    }

    #[test]
    fn only_employers_and_admins_post_jobs() {
        assert!(!UserRole::Jobseeker.can_post_jobs());
        assert!(UserRole::Employer.can_post_jobs());
        assert!(UserRole::Admin.can_post_jobs());
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Employer).ok(),
            Some("\"employer\"".to_string())
        );
    }
}
