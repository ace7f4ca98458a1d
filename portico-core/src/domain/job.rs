//! Job domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job record as reported by the Job Service.
///
/// The gateway holds an immutable snapshot per request; the Job Service owns
/// the record. `status` is a free-form backend string ("Submitted",
/// "Running", "Completed", "Failed", ...) and is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: String,
    /// Network subdomain for the job's endpoint. Assigned asynchronously by
    /// the orchestration backend; absent until the deployment is scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
}
