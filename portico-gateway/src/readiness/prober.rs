//! URL readiness prober
//!
//! Verifies that a resolved endpoint URL actually answers HTTP. Probes with
//! HEAD (falling back to GET where the target rejects HEAD), retries with
//! exponential backoff, and caches every terminal outcome.

use std::sync::Arc;
use std::time::{Duration, Instant};

use portico_core::dto::status::UrlCheckDetails;
use reqwest::{Client, redirect};

use crate::readiness::cache::{ProbeOutcome, ReadinessCache};

/// Failure of a single probe attempt, classified for the retry loop.
enum AttemptError {
    Timeout,
    Failed { message: String, kind: &'static str },
}

/// Probes endpoint URLs and reports readiness with diagnostics.
pub struct UrlProber {
    client: Client,
    timeout: Duration,
    max_retries: u32,
    cache: Arc<dyn ReadinessCache>,
}

impl UrlProber {
    /// Creates a prober with the given per-attempt timeout, retry limit,
    /// and outcome cache.
    ///
    /// Redirects are not followed: a 3xx from the target already proves the
    /// endpoint is answering.
    pub fn new(timeout: Duration, max_retries: u32, cache: Arc<dyn ReadinessCache>) -> Self {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            timeout,
            max_retries,
            cache,
        }
    }

    /// Check whether `url` is ready for access.
    ///
    /// Returns the cached outcome when a fresh entry exists; otherwise
    /// probes with up to `max_retries` attempts, sleeping `0.5 * 2^n`
    /// seconds between failed attempts. Every terminal outcome (response or
    /// exhaustion) is written back to the cache keyed by the URL.
    pub async fn check_ready(&self, url: &str) -> (bool, UrlCheckDetails) {
        if let Some(hit) = self.cache.get(url) {
            tracing::debug!(url, ready = hit.ready, "probe cache hit");
            return (hit.ready, hit.details);
        }

        for attempt in 0..self.max_retries {
            match self.attempt(url, attempt).await {
                Ok(outcome) => {
                    self.cache.put(url, outcome.clone());
                    return (outcome.ready, outcome.details);
                }
                Err(err) => {
                    if attempt + 1 < self.max_retries {
                        let backoff = Duration::from_secs_f64(0.5 * f64::powi(2.0, attempt as i32));
                        tracing::debug!(
                            url,
                            attempt = attempt + 1,
                            backoff_ms = backoff.as_millis() as u64,
                            "probe attempt failed, backing off"
                        );
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    let details = match err {
                        AttemptError::Timeout => {
                            UrlCheckDetails::timeout(self.timeout.as_secs_f64(), attempt + 1)
                        }
                        AttemptError::Failed { message, kind } => {
                            UrlCheckDetails::failure(message, kind, attempt + 1)
                        }
                    };
                    tracing::warn!(url, attempts = attempt + 1, "probe attempts exhausted");

                    let outcome = ProbeOutcome {
                        ready: false,
                        details: details.clone(),
                    };
                    self.cache.put(url, outcome);
                    return (false, details);
                }
            }
        }

        // Only reachable when max_retries is zero.
        let details = UrlCheckDetails::failure("max_retries_exceeded", "exhausted", self.max_retries);
        self.cache.put(
            url,
            ProbeOutcome {
                ready: false,
                details: details.clone(),
            },
        );
        (false, details)
    }

    /// One probe attempt: HEAD, with a GET fallback when the target rejects
    /// HEAD (404/405) or HEAD fails for a non-connection reason. Connection
    /// failures propagate so the outer loop applies backoff.
    async fn attempt(&self, url: &str, attempt: u32) -> Result<ProbeOutcome, AttemptError> {
        let start = Instant::now();

        let response = match self.client.head(url).timeout(self.timeout).send().await {
            Ok(response) if matches!(response.status().as_u16(), 404 | 405) => {
                self.get_fallback(url).await?
            }
            Ok(response) => response,
            Err(err) if err.is_connect() => return Err(classify(err)),
            Err(_) => self.get_fallback(url).await?,
        };

        let response_time_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();
        // 2xx and 3xx both count as ready
        let ready = (200..400).contains(&status);

        Ok(ProbeOutcome {
            ready,
            details: UrlCheckDetails::response(status, response_time_ms, attempt + 1),
        })
    }

    async fn get_fallback(&self, url: &str) -> Result<reqwest::Response, AttemptError> {
        self.client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> AttemptError {
    if err.is_timeout() {
        AttemptError::Timeout
    } else {
        AttemptError::Failed {
            message: err.to_string(),
            kind: error_kind(&err),
        }
    }
}

fn error_kind(err: &reqwest::Error) -> &'static str {
    if err.is_connect() {
        "connect_error"
    } else if err.is_builder() {
        "builder_error"
    } else if err.is_decode() {
        "decode_error"
    } else {
        "request_error"
    }
}
