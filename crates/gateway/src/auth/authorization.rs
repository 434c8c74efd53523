//! Tenant ownership check
//!
//! Decides whether an authenticated caller may reach a resolved tenant. Pure:
//! no I/O, no logging, nothing but the registry and the identity.

use edgegate_shared::TenantRegistry;

use super::Identity;

/// Outcome of the ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'a> {
    /// Forward to this backend
    Proceed { backend_address: &'a str },
    /// Unknown tenant, no identity, or not the owner
    Forbidden,
}

/// Allow the request only when the tenant exists and `identity` owns it
pub fn authorize<'a>(
    tenant_id: &str,
    registry: &'a TenantRegistry,
    identity: Option<&Identity>,
) -> Decision<'a> {
    let Some(record) = registry.lookup(tenant_id) else {
        return Decision::Forbidden;
    };

    match identity {
        Some(identity) if identity.subject_id() == record.owner_subject_id => Decision::Proceed {
            backend_address: &record.backend_address,
        },
        _ => Decision::Forbidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegate_shared::TenantRecord;

    fn registry() -> TenantRegistry {
        TenantRegistry::from_records(vec![
            TenantRecord::new("project1", "user1", "project1-service:8080"),
            TenantRecord::new("project2", "user2", "project2-service:8080"),
        ])
        .unwrap()
    }

    #[test]
    fn test_owner_proceeds() {
        let registry = registry();
        let user1 = Identity::new("user1");

        assert_eq!(
            authorize("project1", &registry, Some(&user1)),
            Decision::Proceed {
                backend_address: "project1-service:8080"
            }
        );
    }

    #[test]
    fn test_non_owner_forbidden() {
        let registry = registry();
        let user2 = Identity::new("user2");

        assert_eq!(
            authorize("project1", &registry, Some(&user2)),
            Decision::Forbidden
        );
    }

    #[test]
    fn test_missing_identity_forbidden() {
        let registry = registry();
        assert_eq!(authorize("project1", &registry, None), Decision::Forbidden);
    }

    #[test]
    fn test_unknown_tenant_forbidden_regardless_of_identity() {
        let registry = registry();
        for identity in [None, Some(Identity::new("user1")), Some(Identity::new("user2"))] {
            assert_eq!(
                authorize("unknown", &registry, identity.as_ref()),
                Decision::Forbidden
            );
        }
    }

    #[test]
    fn test_proceed_iff_subject_matches_owner() {
        let registry = registry();
        let subjects = ["user1", "user2", "User1", "user1 ", ""];

        for tenant in ["project1", "project2"] {
            let owner = registry.lookup(tenant).unwrap().owner_subject_id.as_str();
            for subject in subjects {
                let identity = Identity::new(subject);
                let decision = authorize(tenant, &registry, Some(&identity));
                assert_eq!(
                    matches!(decision, Decision::Proceed { .. }),
                    subject == owner,
                    "tenant={} subject={:?}",
                    tenant,
                    subject
                );
            }
        }
    }
}
