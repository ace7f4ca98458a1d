//! Exposure Service endpoints
//!
//! The subdomain discovery chain (`get_external_id` then
//! `get_async_metadata`) plus the admin control pass-throughs. The
//! async-metadata endpoint answers 404 until the deployment has been
//! scheduled; callers treat that as "not yet published" and retry.

use crate::error::Result;
use crate::{ExposureClient, handle_empty_response, handle_response};
use portico_core::domain::exposure::{AsyncMetadata, ExternalId, TimeLimit};
use uuid::Uuid;

impl ExposureClient {
    /// Get the external id for a job
    ///
    /// The external id keys all async metadata for the job. It is not
    /// guaranteed to exist immediately after job creation.
    pub async fn get_external_id(&self, job_id: Uuid) -> Result<ExternalId> {
        let url = format!("{}/external-id/{}", self.base_url, job_id);
        tracing::debug!(%job_id, "fetching external id");

        let response = self.client.get(&url).send().await?;

        handle_response(response).await
    }

    /// Get asynchronously generated metadata for a job
    ///
    /// Returns the dynamically assigned subdomain once the deployment has
    /// been scheduled. Until then the service answers 404, surfaced as
    /// `ClientError::ApiError { status: 404, .. }` (check with
    /// [`crate::ClientError::is_not_found`]).
    pub async fn get_async_metadata(&self, external_id: &str) -> Result<AsyncMetadata> {
        let url = format!("{}/async-data", self.base_url);
        tracing::debug!(external_id, "fetching async metadata");

        let response = self
            .client
            .get(&url)
            .query(&[("external-id", external_id)])
            .send()
            .await?;

        handle_response(response).await
    }

    // =============================================================================
    // Admin control operations
    // =============================================================================

    /// Get the current time limit for a job
    pub async fn get_time_limit(&self, job_id: Uuid) -> Result<TimeLimit> {
        let url = format!("{}/admin/jobs/{}/time-limit", self.base_url, job_id);
        let response = self.client.get(&url).send().await?;

        handle_response(response).await
    }

    /// Extend the time limit for a job
    pub async fn extend_time_limit(&self, job_id: Uuid) -> Result<TimeLimit> {
        let url = format!("{}/admin/jobs/{}/time-limit", self.base_url, job_id);
        tracing::debug!(%job_id, "extending time limit");

        let response = self.client.post(&url).send().await?;

        handle_response(response).await
    }

    /// Save outputs and terminate a job
    ///
    /// The Exposure Service returns 200 with no body for this endpoint.
    pub async fn save_and_exit(&self, job_id: Uuid) -> Result<()> {
        let url = format!("{}/admin/jobs/{}/save-and-exit", self.base_url, job_id);
        tracing::debug!(%job_id, "terminating job with outputs saved");

        let response = self.client.post(&url).send().await?;

        handle_empty_response(response).await
    }

    /// Terminate a job without saving outputs
    ///
    /// The Exposure Service returns 200 with no body for this endpoint.
    pub async fn exit_without_save(&self, job_id: Uuid) -> Result<()> {
        let url = format!("{}/admin/jobs/{}/exit", self.base_url, job_id);
        tracing::debug!(%job_id, "terminating job without saving outputs");

        let response = self.client.post(&url).send().await?;

        handle_empty_response(response).await
    }
}
