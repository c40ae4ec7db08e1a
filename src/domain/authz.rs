//! Authorization predicates.
//!
//! Ownership and role rules live here, defined once and tested once,
//! instead of being re-derived inside each handler. Every predicate is a
//! pure function over the actor's role/identity and the resource's owner.

use super::ids::UserId;
use super::user::UserRole;

/// Whether the actor may update or delete a job owned by `employer_id`.
///
/// Owners and admins only.
#[must_use]
pub fn can_manage_job(actor_role: UserRole, actor_id: UserId, employer_id: UserId) -> bool {
    actor_role == UserRole::Admin || actor_id == employer_id
}

/// Whether the actor may list or review applications belonging to the
/// employer `employer_id`.
///
/// Same rule as [`can_manage_job`]; applications carry a denormalized
/// employer reference so this never needs the parent job loaded.
#[must_use]
pub fn can_review_applications(actor_role: UserRole, actor_id: UserId, employer_id: UserId) -> bool {
    actor_role == UserRole::Admin || actor_id == employer_id
}

/// Whether a job view by this actor should count towards the job's view
/// counter. Self-views by the owning employer never do.
#[must_use]
pub fn view_counts(viewer: Option<UserId>, employer_id: UserId) -> bool {
    viewer != Some(employer_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_manage_own_job() {
        let owner = UserId::new();
        assert!(can_manage_job(UserRole::Employer, owner, owner));
    }

    #[test]
    fn other_employer_cannot_manage_job() {
        let owner = UserId::new();
        let other = UserId::new();
        assert!(!can_manage_job(UserRole::Employer, other, owner));
    }

    #[test]
    fn admin_can_manage_any_job() {
        let owner = UserId::new();
        let admin = UserId::new();
        assert!(can_manage_job(UserRole::Admin, admin, owner));
    }

    #[test]
    fn review_rule_matches_manage_rule() {
        let owner = UserId::new();
        let other = UserId::new();
        assert!(can_review_applications(UserRole::Employer, owner, owner));
        assert!(!can_review_applications(UserRole::Jobseeker, other, owner));
        assert!(can_review_applications(UserRole::Admin, other, owner));
    }

    #[test]
    fn owner_views_never_count() {
        let owner = UserId::new();
        assert!(!view_counts(Some(owner), owner));
    }

    #[test]
    fn anonymous_and_third_party_views_count() {
        let owner = UserId::new();
        let visitor = UserId::new();
        assert!(view_counts(None, owner));
        assert!(view_counts(Some(visitor), owner));
    }
}
