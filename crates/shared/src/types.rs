//! Common types used across EdgeGate

use serde::{Deserialize, Serialize};

/// A tenant known to the gateway: who owns it and where its traffic goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRecord {
    /// Subdomain label addressing the tenant (always lowercase)
    pub tenant_id: String,
    /// The only subject allowed through to the backend
    pub owner_subject_id: String,
    /// Backend location, either `host[:port]` or a full base URL
    pub backend_address: String,
}

impl TenantRecord {
    pub fn new(
        tenant_id: impl Into<String>,
        owner_subject_id: impl Into<String>,
        backend_address: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            owner_subject_id: owner_subject_id.into(),
            backend_address: backend_address.into(),
        }
    }
}

/// On-disk shape of a registry entry, keyed by tenant id in the enclosing map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantEntry {
    #[serde(alias = "userId")]
    pub owner_subject_id: String,
    #[serde(alias = "k8Service")]
    pub backend_address: String,
}
