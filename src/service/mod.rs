//! Service layer: business logic orchestration.
//!
//! Each service owns the rules for one part of the system and delegates
//! storage to the [`super::persistence`] stores. Handlers stay thin and
//! translate between the wire DTOs and these services.

pub mod analytics_service;
pub mod application_service;
pub mod auth_service;
pub mod job_service;
pub mod saved_job_service;

pub use analytics_service::AnalyticsService;
pub use application_service::ApplicationService;
pub use auth_service::AuthService;
pub use job_service::JobService;
pub use saved_job_service::SavedJobService;
