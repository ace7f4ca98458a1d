//! Gateway configuration
//!
//! Defines all configurable parameters for the gateway including backend
//! URLs, the readiness-probe policy, and the subdomain-resolution policy.

use std::time::Duration;

/// Gateway configuration
///
/// All timeouts and retry counts are configurable to allow tuning for
/// different deployment scenarios (dev vs prod, fast vs slow networks).
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Job Service base URL (e.g., "http://jobs.svc:8080")
    pub jobs_base_url: String,

    /// Exposure Service base URL
    pub exposure_base_url: String,

    /// JWKS endpoint of the OIDC provider, used to verify bearer tokens
    pub jwks_url: String,

    /// Expected token issuer; no issuer check when unset
    pub jwt_issuer: Option<String>,

    /// Scheme used to build the probe URL (https outside dev setups)
    pub app_scheme: String,

    /// Domain suffix appended to a subdomain to build the probe URL
    /// (e.g., ".apps.example.org")
    pub app_domain: String,

    /// Suffix stripped from usernames in token claims (e.g., "@example.org")
    pub user_suffix: String,

    /// Base path for generated output directories
    pub output_base: String,

    /// Timeout applied to Job Service and Exposure Service calls
    pub backend_timeout: Duration,

    /// Per-attempt timeout for URL readiness probes
    pub url_check_timeout: Duration,

    /// Number of probe attempts before giving up
    pub url_check_retries: u32,

    /// How long a cached probe outcome stays valid
    pub url_check_cache_ttl: Duration,

    /// Maximum async-metadata lookups when resolving a subdomain
    pub subdomain_max_retries: u32,

    /// Fixed delay between async-metadata lookups
    pub subdomain_retry_delay: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(
        jobs_base_url: String,
        exposure_base_url: String,
        jwks_url: String,
    ) -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            jobs_base_url,
            exposure_base_url,
            jwks_url,
            jwt_issuer: None,
            app_scheme: "https".to_string(),
            app_domain: ".apps.local".to_string(),
            user_suffix: String::new(),
            output_base: "/data/home".to_string(),
            backend_timeout: Duration::from_secs(30),
            url_check_timeout: Duration::from_secs_f64(5.0),
            url_check_retries: 3,
            url_check_cache_ttl: Duration::from_secs_f64(5.0),
            subdomain_max_retries: 5,
            subdomain_retry_delay: Duration::from_secs_f64(1.0),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JOBS_BASE_URL (required)
    /// - EXPOSURE_BASE_URL (required)
    /// - OIDC_JWKS_URL (required)
    /// - OIDC_ISSUER (optional)
    /// - GATEWAY_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - APP_SCHEME (optional, default: https)
    /// - APP_DOMAIN (optional, default: .apps.local)
    /// - USER_SUFFIX (optional, default: empty)
    /// - OUTPUT_BASE (optional, default: /data/home)
    /// - BACKEND_TIMEOUT (optional, seconds, default: 30)
    /// - URL_CHECK_TIMEOUT (optional, seconds, default: 5.0)
    /// - URL_CHECK_RETRIES (optional, default: 3)
    /// - URL_CHECK_CACHE_TTL (optional, seconds, default: 5.0)
    /// - SUBDOMAIN_MAX_RETRIES (optional, default: 5)
    /// - SUBDOMAIN_RETRY_DELAY (optional, seconds, default: 1.0)
    pub fn from_env() -> anyhow::Result<Self> {
        let jobs_base_url = std::env::var("JOBS_BASE_URL")
            .map_err(|_| anyhow::anyhow!("JOBS_BASE_URL environment variable not set"))?;

        let exposure_base_url = std::env::var("EXPOSURE_BASE_URL")
            .map_err(|_| anyhow::anyhow!("EXPOSURE_BASE_URL environment variable not set"))?;

        let jwks_url = std::env::var("OIDC_JWKS_URL")
            .map_err(|_| anyhow::anyhow!("OIDC_JWKS_URL environment variable not set"))?;

        let mut config = Self::new(jobs_base_url, exposure_base_url, jwks_url);

        if let Ok(addr) = std::env::var("GATEWAY_BIND_ADDR") {
            config.bind_addr = addr;
        }
        config.jwt_issuer = std::env::var("OIDC_ISSUER").ok();
        if let Ok(scheme) = std::env::var("APP_SCHEME") {
            config.app_scheme = scheme;
        }
        if let Ok(domain) = std::env::var("APP_DOMAIN") {
            config.app_domain = domain;
        }
        if let Ok(suffix) = std::env::var("USER_SUFFIX") {
            config.user_suffix = suffix;
        }
        if let Ok(base) = std::env::var("OUTPUT_BASE") {
            config.output_base = base;
        }

        config.backend_timeout = env_seconds("BACKEND_TIMEOUT", config.backend_timeout);
        config.url_check_timeout = env_seconds("URL_CHECK_TIMEOUT", config.url_check_timeout);
        config.url_check_cache_ttl = env_seconds("URL_CHECK_CACHE_TTL", config.url_check_cache_ttl);
        config.subdomain_retry_delay =
            env_seconds("SUBDOMAIN_RETRY_DELAY", config.subdomain_retry_delay);

        if let Some(retries) = env_parse::<u32>("URL_CHECK_RETRIES") {
            config.url_check_retries = retries;
        }
        if let Some(retries) = env_parse::<u32>("SUBDOMAIN_MAX_RETRIES") {
            config.subdomain_max_retries = retries;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("jobs_base_url", &self.jobs_base_url),
            ("exposure_base_url", &self.exposure_base_url),
            ("jwks_url", &self.jwks_url),
        ] {
            if url.is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.app_domain.is_empty() {
            anyhow::bail!("app_domain cannot be empty");
        }

        if self.app_scheme != "http" && self.app_scheme != "https" {
            anyhow::bail!("app_scheme must be http or https");
        }

        if self.url_check_retries == 0 {
            anyhow::bail!("url_check_retries must be greater than 0");
        }

        if self.subdomain_max_retries == 0 {
            anyhow::bail!("subdomain_max_retries must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            "http://localhost:8081".to_string(),
            "http://localhost:8082".to_string(),
            "http://localhost:8083/jwks.json".to_string(),
        )
    }
}

fn env_seconds(var: &str, default: Duration) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .map(Duration::from_secs_f64)
        .unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|s| s.parse::<T>().ok())
}
