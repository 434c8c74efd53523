//! Host-to-Tenant Resolution

use std::net::IpAddr;

use axum::{extract::Request, http::header};

/// Extract the tenant id addressed by `host`.
///
/// A tenant is addressed only when a label sits in front of a registrable
/// domain: `a.b.com` and `a.b.c.com` both yield `a`, while `b.com`,
/// `localhost` and IP literals address no tenant and yield `None`.
pub fn resolve_tenant(host: &str) -> Option<String> {
    let host = normalize_host(host);
    if host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 3 || labels.iter().any(|label| label.is_empty()) {
        return None;
    }
    Some(labels[0].to_string())
}

/// Host the request was sent to, from the `Host` header or the URI authority
pub fn request_host(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri().host())
}

/// Normalize a host header value
pub fn normalize_host(host: &str) -> String {
    // Remove port if present
    let host = host.trim().split(':').next().unwrap_or(host);
    // Lowercase
    host.to_lowercase()
}
