//! Job Service endpoints

use crate::error::Result;
use crate::{JobsClient, handle_response};
use portico_core::domain::job::Job;
use portico_core::dto::job::JobSubmission;
use uuid::Uuid;

impl JobsClient {
    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    /// * `username` - Username for the request context; the Job Service
    ///   scopes visibility to the requesting user
    ///
    /// # Returns
    /// The job record, or `ClientError::ApiError { status: 404, .. }` when
    /// the job does not exist or is not visible to the user
    pub async fn get_job(&self, job_id: Uuid, username: &str) -> Result<Job> {
        let url = format!("{}/jobs/{}", self.base_url, job_id);
        tracing::debug!(%job_id, username, "fetching job record");

        let response = self
            .client
            .get(&url)
            .query(&[("user", username)])
            .send()
            .await?;

        handle_response(response).await
    }

    /// Submit a new job
    ///
    /// # Arguments
    /// * `submission` - The fully defaulted submission payload
    /// * `username` - Username submitting the job
    /// * `email` - User's email, sent as a query parameter per the Job
    ///   Service contract
    ///
    /// # Returns
    /// The created job record
    pub async fn submit_job(
        &self,
        submission: &JobSubmission,
        username: &str,
        email: &str,
    ) -> Result<Job> {
        let url = format!("{}/jobs", self.base_url);
        tracing::debug!(app_id = %submission.app_id, username, "submitting job");

        let response = self
            .client
            .post(&url)
            .query(&[("user", username), ("email", email)])
            .json(submission)
            .send()
            .await?;

        handle_response(response).await
    }
}
