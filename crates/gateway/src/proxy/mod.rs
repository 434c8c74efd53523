//! Upstream forwarding
//!
//! Streams admitted requests to the tenant backend and relays the response.
//!
//! ```text
//! Client --> EdgeGate (admission) --> project1-service
//!                                 --> project2-service
//! ```
//!
//! Bodies are streamed in both directions, never buffered. Dropping the
//! response (for example when the client disconnects) drops the upstream
//! request and closes the backend connection.

mod client;
mod headers;

pub use client::{target_url, ProxyError, ProxyForwarder, ProxyResult};
pub use headers::strip_hop_by_hop;
