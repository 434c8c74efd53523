//! Error types for EdgeGate

use thiserror::Error;

/// Errors raised while building a [`crate::TenantRegistry`]
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read tenant registry: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tenant registry: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tenant entry '{tenant_id}': {reason}")]
    InvalidTenant {
        tenant_id: String,
        reason: &'static str,
    },
}
