//! Service layer
//!
//! Business logic behind the API handlers. Each submodule owns one
//! operation family and its error type.

pub mod control;
pub mod launch;
pub mod status;

/// Build the externally reachable URL for a resolved subdomain.
pub fn app_url(scheme: &str, subdomain: &str, app_domain: &str) -> String {
    format!("{}://{}{}", scheme, subdomain, app_domain)
}
