//! REST endpoint handlers organized by resource.

pub mod analytics;
pub mod applications;
pub mod auth;
pub mod jobs;
pub mod saved;
pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(jobs::routes())
        .merge(applications::routes())
        .merge(saved::routes())
        .merge(analytics::routes())
        .merge(users::routes())
}
