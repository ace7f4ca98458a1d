//! Shared application state
//!
//! Built once at startup from the configuration and handed to the router.
//! Everything here is cheaply cloneable; the probe cache behind the prober
//! is the only shared mutable state in the gateway.

use std::sync::Arc;

use portico_client::{ExposureClient, JobsClient};

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::readiness::cache::TtlReadinessCache;
use crate::readiness::prober::UrlProber;
use crate::readiness::resolver::SubdomainResolver;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jobs: JobsClient,
    pub exposure: Arc<ExposureClient>,
    pub resolver: Arc<SubdomainResolver>,
    pub prober: Arc<UrlProber>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let backend_client = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()
            .expect("Failed to build HTTP client");

        let jobs = JobsClient::with_client(&config.jobs_base_url, backend_client.clone());
        let exposure = Arc::new(ExposureClient::with_client(
            &config.exposure_base_url,
            backend_client,
        ));

        let cache = Arc::new(TtlReadinessCache::new(config.url_check_cache_ttl));
        let prober = Arc::new(UrlProber::new(
            config.url_check_timeout,
            config.url_check_retries,
            cache,
        ));
        let resolver = Arc::new(SubdomainResolver::new(
            Arc::clone(&exposure),
            config.subdomain_max_retries,
            config.subdomain_retry_delay,
        ));
        let verifier = Arc::new(TokenVerifier::new(&config));

        Self {
            config: Arc::new(config),
            jobs,
            exposure,
            resolver,
            prober,
            verifier,
        }
    }
}
