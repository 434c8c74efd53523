//! EdgeGate Shared Types and Utilities
//!
//! This crate contains the tenant model shared by the gateway server and its tooling.

pub mod error;
pub mod registry;
pub mod types;

pub use error::*;
pub use registry::TenantRegistry;
pub use types::*;
