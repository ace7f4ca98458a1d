//! Shared helpers for gateway integration tests.
//!
//! Tests run the gateway components against stub backends: small axum
//! routers bound to an ephemeral local port, with atomic counters so tests
//! can assert exactly how many calls each endpoint received.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use portico_gateway::config::Config;

/// A stub backend listening on an ephemeral local port.
pub struct TestServer {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(router: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub listener");
        let addr = listener.local_addr().expect("stub listener has no address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server failed");
        });

        Self { addr, handle }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Host:port authority, usable as a stand-in subdomain value.
    pub fn authority(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Shared call counter for stub handlers.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call and return its 1-indexed sequence number.
    pub fn record(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Gateway config pointed at stub backends, with short delays so retry
/// loops run in test time.
pub fn test_config(jobs_url: &str, exposure_url: &str) -> Config {
    let mut config = Config::new(
        jobs_url.to_string(),
        exposure_url.to_string(),
        "http://127.0.0.1:1/jwks.json".to_string(),
    );
    config.app_scheme = "http".to_string();
    config.app_domain = ".apps.test".to_string();
    config.backend_timeout = Duration::from_secs(5);
    config.url_check_timeout = Duration::from_millis(250);
    config.url_check_cache_ttl = Duration::from_secs(5);
    config.subdomain_retry_delay = Duration::from_millis(50);
    config
}

/// Find a local port with nothing listening on it.
pub async fn unused_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("listener has no address");
    drop(listener);
    addr
}
