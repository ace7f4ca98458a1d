//! Shared domain types and DTOs for the Portico gateway.
//!
//! `domain` holds snapshots of records owned by the backend services (the
//! gateway never persists them); `dto` holds the request and response shapes
//! the gateway exposes to its own callers.

pub mod domain;
pub mod dto;
