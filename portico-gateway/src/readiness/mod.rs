//! Endpoint readiness engine
//!
//! After a job is launched its subdomain is generated out-of-band by the
//! orchestration backend. This module discovers the subdomain by polling the
//! Exposure Service (`resolver`), verifies the resulting URL is actually
//! reachable with live HTTP probes (`prober`), and caches probe outcomes to
//! bound load on the probe targets (`cache`).

pub mod cache;
pub mod prober;
pub mod resolver;
