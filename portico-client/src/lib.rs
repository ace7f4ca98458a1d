//! Portico backend clients
//!
//! Typed HTTP clients for the two services the gateway fronts: the Job
//! Service (submit and query jobs) and the Exposure Service (network
//! exposure metadata and admin control for launched jobs).
//!
//! # Example
//!
//! ```no_run
//! use portico_client::JobsClient;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JobsClient::new("http://jobs.svc:8080");
//!     let job = client.get_job(Uuid::new_v4(), "alice").await?;
//!     println!("job {} is {}", job.id, job.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod exposure;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Job Service
///
/// Covers job submission and lookup. A "not found" from the Job Service is
/// reported as `ClientError::ApiError { status: 404, .. }` so callers can
/// distinguish it from other upstream failures.
#[derive(Debug, Clone)]
pub struct JobsClient {
    /// Base URL of the Job Service (e.g., "http://jobs.svc:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

/// HTTP client for the Exposure Service
///
/// Covers the two-step subdomain discovery chain (external id, then async
/// metadata) and the admin control endpoints (time limits, save-and-exit,
/// exit-without-save).
#[derive(Debug, Clone)]
pub struct ExposureClient {
    /// Base URL of the Exposure Service
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobsClient {
    /// Create a new Job Service client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a client with a custom reqwest client (timeouts, proxies, TLS)
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the Job Service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ExposureClient {
    /// Create a new Exposure Service client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a client with a custom reqwest client (timeouts, proxies, TLS)
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the Exposure Service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Check the status code and deserialize the JSON body, or surface the
/// backend's error text as a `ClientError::ApiError`.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Check the status code for endpoints that return no body.
async fn handle_empty_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    Ok(())
}
