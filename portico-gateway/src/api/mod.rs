//! API Module
//!
//! HTTP API layer for the gateway.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod health;
pub mod job;
pub mod status;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Job endpoints
        .route("/jobs/launch", post(job::launch_job))
        .route("/jobs/{id}/status", get(status::get_job_status))
        .route("/jobs/{id}/control", post(job::control_job))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
