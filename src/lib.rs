//! # jobboard-api
//!
//! REST backend for a job board: accounts, job postings, applications,
//! saved-job bookmarks, and usage analytics over PostgreSQL.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Bearer-token extractors (auth/)
//!     │
//!     ├── AuthService / JobService / ApplicationService
//!     ├── SavedJobService / AnalyticsService (service/)
//!     │
//!     ├── Stores (persistence/)
//!     │
//!     └── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
