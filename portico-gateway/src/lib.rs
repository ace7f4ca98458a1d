//! Portico gateway
//!
//! Backend-for-frontend gateway for an interactive-job platform: verifies
//! bearer tokens, proxies the Job Service and the Exposure Service, and owns
//! the subdomain-resolution / URL-readiness engine.

pub mod api;
pub mod auth;
pub mod config;
pub mod readiness;
pub mod service;
pub mod state;
