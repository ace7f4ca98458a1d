//! Admin control operations
//!
//! Thin pass-throughs to the Exposure Service. Unlike readiness checks these
//! are the operation itself, so failures propagate to the caller.

use portico_client::ClientError;
use portico_core::dto::control::{ControlOperation, ControlResponse};
use uuid::Uuid;

use crate::state::AppState;

/// Service error type
#[derive(Debug)]
pub enum ControlError {
    NotFound(Uuid),
    Upstream(ClientError),
}

/// Apply a control operation to a running job.
pub async fn control_job(
    state: &AppState,
    job_id: Uuid,
    operation: ControlOperation,
) -> Result<ControlResponse, ControlError> {
    let map_err = |err: ClientError| {
        if err.is_not_found() {
            ControlError::NotFound(job_id)
        } else {
            ControlError::Upstream(err)
        }
    };

    let response = match operation {
        ControlOperation::ExtendTime => {
            let limit = state
                .exposure
                .extend_time_limit(job_id)
                .await
                .map_err(map_err)?;

            ControlResponse {
                operation,
                status: None,
                outputs_saved: None,
                time_limit: limit.time_limit,
            }
        }
        ControlOperation::SaveAndExit => {
            state.exposure.save_and_exit(job_id).await.map_err(map_err)?;

            // The Exposure Service returns no body for this endpoint.
            ControlResponse {
                operation,
                status: Some("terminated".to_string()),
                outputs_saved: Some(true),
                time_limit: None,
            }
        }
        ControlOperation::Exit => {
            state
                .exposure
                .exit_without_save(job_id)
                .await
                .map_err(map_err)?;

            ControlResponse {
                operation,
                status: Some("terminated".to_string()),
                outputs_saved: Some(false),
                time_limit: None,
            }
        }
    };

    tracing::info!(%job_id, ?operation, "control operation applied");

    Ok(response)
}
