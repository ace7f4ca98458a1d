//! Exposure Service domain types
//!
//! Records returned by the Exposure Service, which tracks the network
//! exposure of launched jobs and offers admin control over them.

use serde::{Deserialize, Serialize};

/// Secondary identifier for a job, used as the key for async metadata.
///
/// Not guaranteed to exist immediately after job creation; the field is
/// absent until the backend has registered the job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalId {
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Asynchronously generated network metadata for a job.
///
/// Populated by a downstream orchestration process after the job's
/// deployment is scheduled, typically one to several seconds after
/// submission. The Exposure Service answers 404 until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsyncMetadata {
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub ip_addr: Option<String>,
}

/// Time-limit record for a running job (admin endpoints).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeLimit {
    #[serde(default)]
    pub time_limit: Option<String>,
}
