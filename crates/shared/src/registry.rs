//! Tenant registry
//!
//! Read-only mapping from tenant id to its owner and backend. The registry is
//! built once at startup and then only ever read, so it can be shared across
//! request tasks behind an `Arc` without any locking.

use std::collections::HashMap;
use std::path::Path;

use crate::error::RegistryError;
use crate::types::{TenantEntry, TenantRecord};

/// Tenant used when no registry source is configured
pub const DEFAULT_TENANT_ID: &str = "project1";
/// Owner of the default tenant
pub const DEFAULT_TENANT_OWNER: &str = "user1";
/// Backend of the default tenant
pub const DEFAULT_TENANT_BACKEND: &str = "project1-service.default.svc.cluster.local";

/// Immutable tenant lookup table
#[derive(Debug, Clone, Default)]
pub struct TenantRegistry {
    tenants: HashMap<String, TenantRecord>,
}

impl TenantRegistry {
    /// Build a registry from records, validating each one
    ///
    /// Tenant ids are lowercased so they line up with resolved hostnames.
    /// A later record with the same id replaces an earlier one.
    pub fn from_records(
        records: impl IntoIterator<Item = TenantRecord>,
    ) -> Result<Self, RegistryError> {
        let mut tenants = HashMap::new();
        for mut record in records {
            record.tenant_id = record.tenant_id.trim().to_lowercase();
            validate(&record)?;
            tenants.insert(record.tenant_id.clone(), record);
        }
        Ok(Self { tenants })
    }

    /// Parse a registry from JSON of the form
    /// `{ "<tenantId>": { "ownerSubjectId": "...", "backendAddress": "..." } }`
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let entries: HashMap<String, TenantEntry> = serde_json::from_str(json)?;
        Self::from_records(entries.into_iter().map(|(tenant_id, entry)| {
            TenantRecord::new(tenant_id, entry.owner_subject_id, entry.backend_address)
        }))
    }

    /// Load a registry from a JSON file on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let registry = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            tenants = registry.len(),
            "Loaded tenant registry"
        );
        Ok(registry)
    }

    /// The built-in single-tenant table
    pub fn builtin() -> Self {
        let record = TenantRecord::new(
            DEFAULT_TENANT_ID,
            DEFAULT_TENANT_OWNER,
            DEFAULT_TENANT_BACKEND,
        );
        Self {
            tenants: HashMap::from([(record.tenant_id.clone(), record)]),
        }
    }

    /// Look up a tenant by id
    pub fn lookup(&self, tenant_id: &str) -> Option<&TenantRecord> {
        self.tenants.get(tenant_id)
    }

    /// Number of tenants
    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

fn validate(record: &TenantRecord) -> Result<(), RegistryError> {
    let invalid = |reason| RegistryError::InvalidTenant {
        tenant_id: record.tenant_id.clone(),
        reason,
    };

    if record.tenant_id.is_empty() {
        return Err(invalid("tenant id is empty"));
    }
    // Only the leftmost host label is ever resolved, so a dotted id could never match
    if record.tenant_id.contains('.') {
        return Err(invalid("tenant id must be a single host label"));
    }
    if record.owner_subject_id.is_empty() {
        return Err(invalid("owner subject id is empty"));
    }
    if backend_host(&record.backend_address).is_empty() {
        return Err(invalid("backend address has no host"));
    }
    Ok(())
}

/// Authority part of a backend address, with or without a scheme
fn backend_host(address: &str) -> &str {
    let address = address.trim();
    let rest = address
        .split_once("://")
        .map_or(address, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        let registry = TenantRegistry::from_records(vec![
            TenantRecord::new("project1", "user1", "backend-1:8080"),
            TenantRecord::new("project2", "user2", "http://backend-2"),
        ])
        .unwrap();

        let record = registry.lookup("project1").unwrap();
        assert_eq!(record.owner_subject_id, "user1");
        assert_eq!(record.backend_address, "backend-1:8080");
        assert!(registry.lookup("project3").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_tenant_ids_are_lowercased() {
        let registry =
            TenantRegistry::from_records(vec![TenantRecord::new("Acme", "user1", "acme:80")])
                .unwrap();

        assert!(registry.lookup("acme").is_some());
        assert!(registry.lookup("Acme").is_none());
    }

    #[test]
    fn test_builtin_registry() {
        let registry = TenantRegistry::builtin();
        let record = registry.lookup(DEFAULT_TENANT_ID).unwrap();
        assert_eq!(record.owner_subject_id, DEFAULT_TENANT_OWNER);
        assert_eq!(record.backend_address, DEFAULT_TENANT_BACKEND);
    }

    #[test]
    fn test_from_json_str() {
        let registry = TenantRegistry::from_json_str(
            r#"{
                "project1": { "ownerSubjectId": "user1", "backendAddress": "p1.svc:8080" },
                "project2": { "userId": "user2", "k8Service": "p2.svc" }
            }"#,
        )
        .unwrap();

        assert_eq!(registry.lookup("project1").unwrap().backend_address, "p1.svc:8080");
        assert_eq!(registry.lookup("project2").unwrap().owner_subject_id, "user2");
    }

    #[test]
    fn test_rejects_invalid_entries() {
        let dotted = TenantRegistry::from_records(vec![TenantRecord::new("a.b", "u", "x")]);
        assert!(matches!(dotted, Err(RegistryError::InvalidTenant { .. })));

        let empty_id = TenantRegistry::from_records(vec![TenantRecord::new("  ", "u", "x")]);
        assert!(matches!(empty_id, Err(RegistryError::InvalidTenant { .. })));

        let no_owner = TenantRegistry::from_records(vec![TenantRecord::new("a", "", "x")]);
        assert!(matches!(no_owner, Err(RegistryError::InvalidTenant { .. })));

        for backend in ["", "http://", "https://", "http:///path"] {
            let result = TenantRegistry::from_records(vec![TenantRecord::new("a", "u", backend)]);
            assert!(
                matches!(result, Err(RegistryError::InvalidTenant { .. })),
                "backend={:?}",
                backend
            );
        }
    }

    #[test]
    fn test_backend_host() {
        assert_eq!(backend_host("p1.svc:8080"), "p1.svc:8080");
        assert_eq!(backend_host("http://p2.svc/api"), "p2.svc");
        assert_eq!(backend_host(" https:// "), "");
    }

    #[test]
    fn test_malformed_json() {
        let result = TenantRegistry::from_json_str("{ not json");
        assert!(matches!(result, Err(RegistryError::Parse(_))));

        let missing_field = TenantRegistry::from_json_str(r#"{ "a": { "ownerSubjectId": "u" } }"#);
        assert!(matches!(missing_field, Err(RegistryError::Parse(_))));
    }

    #[test]
    fn test_example_registry_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/tenants.example.json");
        let registry = TenantRegistry::from_json_file(path).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.lookup("project1").unwrap().backend_address,
            DEFAULT_TENANT_BACKEND
        );
    }

    #[test]
    fn test_missing_file() {
        let result = TenantRegistry::from_json_file("/nonexistent/edgegate/tenants.json");
        assert!(matches!(result, Err(RegistryError::Io(_))));
    }
}
