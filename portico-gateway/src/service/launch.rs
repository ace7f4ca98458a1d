//! Job launch
//!
//! Fills the gaps a caller leaves in a launch request (email, name, output
//! directory, notification flags), submits it to the Job Service, and
//! best-effort resolves the subdomain so interactive callers get a URL
//! straight away when the deployment is quick.

use chrono::Utc;
use portico_client::ClientError;
use portico_core::dto::job::{JobSubmission, LaunchJob, LaunchResponse};

use crate::service::app_url;
use crate::state::AppState;

/// Service error type
#[derive(Debug)]
pub enum LaunchError {
    Upstream(ClientError),
}

/// Launch a job on behalf of `username`.
pub async fn launch_job(
    state: &AppState,
    req: LaunchJob,
    username: &str,
    token_email: Option<&str>,
) -> Result<LaunchResponse, LaunchError> {
    let email = resolve_email(
        req.email.as_deref(),
        token_email,
        username,
        &state.config.user_suffix,
    );

    let name = match req.name.filter(|n| !is_placeholder(n)) {
        Some(name) => name,
        None => default_job_name(),
    };

    let output_dir = match req.output_dir.filter(|d| !is_placeholder(d)) {
        Some(dir) => dir,
        None => format!("{}/{}/jobs/{}", state.config.output_base, username, name),
    };

    let submission = JobSubmission {
        app_id: req.app_id,
        name: name.clone(),
        output_dir,
        config: req.config,
        notify: req.notify.unwrap_or(true),
        debug: req.debug.unwrap_or(false),
    };

    let job = state
        .jobs
        .submit_job(&submission, username, &email)
        .await
        .map_err(LaunchError::Upstream)?;

    tracing::info!(job_id = %job.id, username, "job submitted");

    let mut response = LaunchResponse {
        job_id: job.id,
        name: job.name.unwrap_or(name),
        status: job.status,
        url: None,
    };

    // The subdomain is generated asynchronously; include the URL when it is
    // already resolvable, otherwise callers pick it up from the status
    // endpoint.
    if let Some(subdomain) = state.resolver.resolve(response.job_id).await {
        response.url = Some(app_url(
            &state.config.app_scheme,
            &subdomain,
            &state.config.app_domain,
        ));
    }

    Ok(response)
}

/// Resolve the submission email: request body, then token claim, then
/// constructed from the username and the configured suffix.
fn resolve_email(
    from_body: Option<&str>,
    from_token: Option<&str>,
    username: &str,
    user_suffix: &str,
) -> String {
    if let Some(email) = from_body.filter(|e| !is_placeholder(e)) {
        return email.to_string();
    }
    if let Some(email) = from_token {
        return email.to_string();
    }
    format!("{}{}", username, user_suffix)
}

/// Check if a value is a placeholder (empty or an API explorer default).
fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value == "string"
}

fn default_job_name() -> String {
    format!("job-{}", Utc::now().format("%Y-%m-%d-%H%M%S"))
}
