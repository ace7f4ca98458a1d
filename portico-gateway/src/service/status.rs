//! Status aggregation
//!
//! Combines the Job Service record, the resolved subdomain, and the probe
//! outcome into one response. Readiness information is best-effort: resolver
//! and prober failures degrade to "not ready" and never fail the request.
//! The only hard failure is the job-record fetch itself.

use portico_client::ClientError;
use portico_core::dto::status::StatusResult;
use uuid::Uuid;

use crate::service::app_url;
use crate::state::AppState;

/// Service error type
#[derive(Debug)]
pub enum StatusError {
    NotFound(Uuid),
    Upstream(ClientError),
}

/// Get the aggregate status of a job.
pub async fn get_status(
    state: &AppState,
    job_id: Uuid,
    username: &str,
) -> Result<StatusResult, StatusError> {
    let job = state
        .jobs
        .get_job(job_id, username)
        .await
        .map_err(|err| {
            if err.is_not_found() {
                StatusError::NotFound(job_id)
            } else {
                StatusError::Upstream(err)
            }
        })?;

    // Prefer the subdomain on the record; resolve it otherwise. Resolution
    // absorbs its own failures into None.
    let subdomain = match job.subdomain.filter(|s| !s.is_empty()) {
        Some(subdomain) => Some(subdomain),
        None => state.resolver.resolve(job_id).await,
    };

    let mut result = StatusResult {
        job_id,
        status: job.status,
        url_ready: false,
        url: None,
        url_check_details: None,
    };

    if let Some(subdomain) = subdomain {
        let url = app_url(&state.config.app_scheme, &subdomain, &state.config.app_domain);
        let (ready, details) = state.prober.check_ready(&url).await;

        result.url_ready = ready;
        result.url = Some(url);
        result.url_check_details = Some(details);
    }

    Ok(result)
}
