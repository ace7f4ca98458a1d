//! Status DTOs
//!
//! The aggregate status response and the probe diagnostics attached to it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate job status returned by the gateway.
///
/// Composed fresh per request from the Job Service record, the resolved
/// subdomain, and the probe outcome. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResult {
    pub job_id: Uuid,
    pub status: String,
    pub url_ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_check_details: Option<UrlCheckDetails>,
}

/// Diagnostics from a URL readiness probe.
///
/// Exactly one of the three shapes is populated: a response (`status_code` +
/// `response_time_ms`), a timeout (`error = "timeout"` + `timeout_seconds`),
/// or another failure (`error` + `error_type`). `attempt` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlCheckDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    pub attempt: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<f64>,
}

impl UrlCheckDetails {
    /// Diagnostics for an attempt that got an HTTP response.
    pub fn response(status_code: u16, response_time_ms: u64, attempt: u32) -> Self {
        Self {
            status_code: Some(status_code),
            response_time_ms: Some(response_time_ms),
            attempt,
            error: None,
            error_type: None,
            timeout_seconds: None,
        }
    }

    /// Diagnostics for retries exhausted by per-attempt timeouts.
    pub fn timeout(timeout_seconds: f64, attempt: u32) -> Self {
        Self {
            status_code: None,
            response_time_ms: None,
            attempt,
            error: Some("timeout".to_string()),
            error_type: None,
            timeout_seconds: Some(timeout_seconds),
        }
    }

    /// Diagnostics for retries exhausted by non-timeout failures.
    pub fn failure(error: impl Into<String>, error_type: impl Into<String>, attempt: u32) -> Self {
        Self {
            status_code: None,
            response_time_ms: None,
            attempt,
            error: Some(error.into()),
            error_type: Some(error_type.into()),
            timeout_seconds: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_result_omits_absent_fields() {
        let result = StatusResult {
            job_id: Uuid::new_v4(),
            status: "Submitted".to_string(),
            url_ready: false,
            url: None,
            url_check_details: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("url").is_none());
        assert!(json.get("url_check_details").is_none());
        assert_eq!(json["url_ready"], false);
    }

    #[test]
    fn test_details_shapes() {
        let ok = UrlCheckDetails::response(200, 42, 1);
        assert_eq!(ok.status_code, Some(200));
        assert!(ok.error.is_none());

        let timed_out = UrlCheckDetails::timeout(5.0, 3);
        assert_eq!(timed_out.error.as_deref(), Some("timeout"));
        assert_eq!(timed_out.timeout_seconds, Some(5.0));
        assert!(timed_out.status_code.is_none());

        let failed = UrlCheckDetails::failure("connection refused", "connect_error", 2);
        assert_eq!(failed.error_type.as_deref(), Some("connect_error"));
        assert_eq!(failed.attempt, 2);
    }
}
