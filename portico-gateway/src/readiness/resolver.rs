//! Subdomain resolver
//!
//! Discovers the dynamically assigned subdomain for a job by chaining two
//! Exposure Service calls: external-id lookup, then async-metadata lookup.
//! The metadata is published by a downstream orchestration process roughly
//! one to several seconds after submission, so the second call retries
//! not-found with a fixed delay. Absence of a subdomain after exhausting
//! retries is a valid terminal outcome, not an error.

use std::sync::Arc;
use std::time::Duration;

use portico_client::ExposureClient;
use uuid::Uuid;

/// Resolves job subdomains with bounded retries.
pub struct SubdomainResolver {
    exposure: Arc<ExposureClient>,
    max_retries: u32,
    retry_delay: Duration,
}

impl SubdomainResolver {
    pub fn new(exposure: Arc<ExposureClient>, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            exposure,
            max_retries,
            retry_delay,
        }
    }

    /// Resolve the subdomain for `job_id`, or `None` if it cannot be
    /// determined yet.
    ///
    /// The external-id lookup is not retried: any failure there means the
    /// job has no exposure record and the answer is `None`. The
    /// async-metadata lookup retries not-found up to `max_retries` times
    /// with `retry_delay` between attempts; any other failure stops the
    /// loop. All failures are absorbed, never propagated.
    pub async fn resolve(&self, job_id: Uuid) -> Option<String> {
        let external = match self.exposure.get_external_id(job_id).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%job_id, error = %err, "external id lookup failed");
                return None;
            }
        };

        let external_id = external.external_id.filter(|id| !id.is_empty())?;

        for attempt in 0..self.max_retries {
            match self.exposure.get_async_metadata(&external_id).await {
                Ok(metadata) => {
                    if let Some(subdomain) = metadata.subdomain.filter(|s| !s.is_empty()) {
                        tracing::debug!(%job_id, %subdomain, attempt = attempt + 1, "subdomain resolved");
                        return Some(subdomain);
                    }
                    // Metadata exists but the subdomain field is still
                    // unpopulated; retry immediately.
                }
                Err(err) if err.is_not_found() => {
                    // Not published yet; wait if attempts remain.
                    if attempt + 1 < self.max_retries {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(err) => {
                    tracing::warn!(%job_id, error = %err, "async metadata lookup failed");
                    return None;
                }
            }
        }

        tracing::debug!(%job_id, attempts = self.max_retries, "subdomain not published yet");
        None
    }
}
