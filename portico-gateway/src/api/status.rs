//! Status API Handler
//!
//! The aggregate status endpoint: job record + resolved subdomain + live
//! URL probe, composed per request.

use axum::{
    Json,
    extract::{Path, State},
};
use portico_core::dto::status::StatusResult;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::AuthUser;
use crate::service::status as status_service;
use crate::state::AppState;

/// GET /jobs/{id}/status
/// Get the aggregate status of a job, including URL readiness
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> ApiResult<Json<StatusResult>> {
    tracing::debug!(job_id = %id, username = %user.username, "status requested");

    let result = status_service::get_status(&state, id, &user.username)
        .await
        .map_err(|e| match e {
            status_service::StatusError::NotFound(id) => {
                ApiError::NotFound(format!("Job {} not found", id))
            }
            status_service::StatusError::Upstream(err) => ApiError::Upstream(err),
        })?;

    Ok(Json(result))
}
