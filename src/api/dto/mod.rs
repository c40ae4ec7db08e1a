//! Data Transfer Objects for REST request/response serialization.
//!
//! Wire JSON is camelCase throughout; list endpoints share the
//! [`common_dto::PageResponse`] envelope.

pub mod analytics_dto;
pub mod application_dto;
pub mod auth_dto;
pub mod common_dto;
pub mod job_dto;
pub mod saved_dto;

pub use analytics_dto::*;
pub use application_dto::*;
pub use auth_dto::*;
pub use common_dto::*;
pub use job_dto::*;
pub use saved_dto::*;
