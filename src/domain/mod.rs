//! Core domain types: typed identifiers, role/status enums, and
//! authorization predicates shared by the persistence and service layers.

pub mod application;
pub mod authz;
pub mod ids;
pub mod job;
pub mod user;

pub use application::ApplicationStatus;
pub use ids::{ApplicationId, JobId, SavedJobId, UserId};
pub use job::{ExperienceLevel, JobSort, JobStatus, JobType, Salary, SalaryPeriod};
pub use user::UserRole;
