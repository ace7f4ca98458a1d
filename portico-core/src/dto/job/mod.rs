//! Launch DTOs
//!
//! `LaunchJob` is what the gateway's callers send; `JobSubmission` is the
//! enriched payload forwarded to the Job Service after the gateway has
//! filled in defaults (name, output directory, notification flags).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to launch a job through the gateway.
///
/// Every field except `app_id` is optional; the gateway derives sensible
/// defaults for anything left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchJob {
    pub app_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub config: std::collections::HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub notify: Option<bool>,
    #[serde(default)]
    pub debug: Option<bool>,
}

/// Fully defaulted submission forwarded to the Job Service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSubmission {
    pub app_id: Uuid,
    pub name: String,
    pub output_dir: String,
    pub config: std::collections::HashMap<String, serde_json::Value>,
    pub notify: bool,
    pub debug: bool,
}

/// Minimal response returned to the caller after a launch.
///
/// `url` is present only when the subdomain could already be resolved;
/// callers poll the status endpoint otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchResponse {
    pub job_id: Uuid,
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
