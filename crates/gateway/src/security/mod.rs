//! Response hardening for gateway-generated responses

mod headers;

pub use headers::security_headers_middleware;
