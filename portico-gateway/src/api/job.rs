//! Job API Handlers
//!
//! HTTP endpoints for launching and controlling jobs.

use axum::{
    Json,
    extract::{Path, State},
};
use portico_core::dto::control::{ControlRequest, ControlResponse};
use portico_core::dto::job::{LaunchJob, LaunchResponse};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::AuthUser;
use crate::service::{control as control_service, launch as launch_service};
use crate::state::AppState;

/// POST /jobs/launch
/// Submit a job and return its id, status, and URL when already resolvable
pub async fn launch_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<LaunchJob>,
) -> ApiResult<Json<LaunchResponse>> {
    tracing::info!(app_id = %req.app_id, username = %user.username, "launch requested");

    let response = launch_service::launch_job(&state, req, &user.username, user.email.as_deref())
        .await
        .map_err(|e| match e {
            launch_service::LaunchError::Upstream(err) => ApiError::Upstream(err),
        })?;

    Ok(Json(response))
}

/// POST /jobs/{id}/control
/// Apply an admin control operation (extend_time, save_and_exit, exit)
pub async fn control_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
    Json(req): Json<ControlRequest>,
) -> ApiResult<Json<ControlResponse>> {
    tracing::info!(job_id = %id, username = %user.username, operation = ?req.operation, "control requested");

    let response = control_service::control_job(&state, id, req.operation)
        .await
        .map_err(|e| match e {
            control_service::ControlError::NotFound(id) => {
                ApiError::NotFound(format!("Job {} not found", id))
            }
            control_service::ControlError::Upstream(err) => ApiError::Upstream(err),
        })?;

    Ok(Json(response))
}
