//! EdgeGate Gateway Library
//!
//! Multi-tenant edge gateway: authenticates callers by signed token, resolves
//! the tenant from the request host, checks ownership against the tenant
//! registry, and streams admitted requests to the tenant backend.

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod routing;
pub mod security;
pub mod state;

pub use config::Config;
pub use context::{Outcome, RequestContext};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
