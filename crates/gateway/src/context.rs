//! Per-request admission state

use crate::auth::Identity;

/// Terminal outcome of the admission pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Forwarded to the tenant backend
    Proxied,
    /// 403: tenant unknown or caller not its owner
    Forbidden,
    /// 404: no tenant addressed by the host
    NotFound,
    /// 502/504: backend could not be reached
    UpstreamFailed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Proxied => "proxied",
            Outcome::Forbidden => "forbidden",
            Outcome::NotFound => "not_found",
            Outcome::UpstreamFailed => "upstream_failed",
        }
    }
}

/// Admission state for one request.
///
/// The identity is fixed when the context is created by the authentication
/// middleware. The tenant is resolved at most once and the outcome is
/// concluded exactly once; later attempts are ignored and logged.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<Identity>,
    tenant_id: Option<String>,
    outcome: Option<Outcome>,
}

impl RequestContext {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity,
            tenant_id: None,
            outcome: None,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Record the tenant addressed by the request
    pub fn resolve_tenant(&mut self, tenant_id: impl Into<String>) {
        if self.tenant_id.is_some() {
            tracing::warn!("Tenant already resolved for this request");
            return;
        }
        self.tenant_id = Some(tenant_id.into());
    }

    /// Record the terminal outcome and log it
    pub fn conclude(&mut self, outcome: Outcome) {
        if let Some(existing) = self.outcome {
            tracing::warn!(
                existing = existing.as_str(),
                attempted = outcome.as_str(),
                "Request already concluded"
            );
            return;
        }
        self.outcome = Some(outcome);

        tracing::info!(
            outcome = outcome.as_str(),
            tenant_id = self.tenant_id.as_deref().unwrap_or("-"),
            subject_id = self.identity.as_ref().map(Identity::subject_id).unwrap_or("-"),
            "Request admission concluded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_concluded_once() {
        let mut ctx = RequestContext::new(None);
        assert!(ctx.outcome().is_none());

        ctx.conclude(Outcome::Forbidden);
        ctx.conclude(Outcome::Proxied);
        assert_eq!(ctx.outcome(), Some(Outcome::Forbidden));
    }

    #[test]
    fn test_tenant_is_resolved_once() {
        let mut ctx = RequestContext::new(Some(Identity::new("user1")));
        ctx.resolve_tenant("project1");
        ctx.resolve_tenant("project2");

        assert_eq!(ctx.tenant_id(), Some("project1"));
        assert_eq!(ctx.identity().map(Identity::subject_id), Some("user1"));
    }
}
