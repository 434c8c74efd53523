//! Host-based tenant routing
//!
//! Tenants are addressed by the leftmost label of the request host:
//! `project1.gateway.example` targets tenant `project1`.

mod host_resolver;

pub use host_resolver::{normalize_host, request_host, resolve_tenant};
