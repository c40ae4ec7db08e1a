//! Persistence layer: PostgreSQL row models and per-entity stores.
//!
//! Every store holds a clone of the single process-wide `sqlx::PgPool`
//! built at startup; there is no other shared state. Dynamic filters use
//! `QueryBuilder` with bound parameters only.

pub mod analytics;
pub mod applications;
pub mod jobs;
pub mod models;
pub mod saved_jobs;
pub mod users;

pub use analytics::{AnalyticsStore, NewAnalyticsEvent};
pub use applications::{ApplicationFilter, ApplicationStore, NewApplication};
pub use jobs::{JobChanges, JobFilter, JobStore, NewJob};
pub use saved_jobs::SavedJobStore;
pub use users::{NewUser, ProfileChanges, UserStore};
