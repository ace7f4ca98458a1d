//! Control DTOs for admin operations on running jobs

use serde::{Deserialize, Serialize};

/// Admin operation on a running job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOperation {
    ExtendTime,
    SaveAndExit,
    Exit,
}

/// Request body for the control endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlRequest {
    pub operation: ControlOperation,
}

/// Result of a control operation.
///
/// `extend_time` carries the new time limit; the two exit variants carry a
/// terminal status and whether outputs were saved (the Exposure Service
/// returns no body for them, so the gateway synthesizes these fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlResponse {
    pub operation: ControlOperation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs_saved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<String>,
}
