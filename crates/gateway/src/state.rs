//! Shared application state

use std::sync::Arc;

use edgegate_shared::{RegistryError, TenantRegistry};

use crate::auth::{TokenAuthenticator, TokenIssuer};
use crate::config::Config;
use crate::proxy::{ProxyForwarder, ProxyResult};

/// State shared by every request handler.
///
/// Everything in here is read-only after startup; cloning only bumps
/// reference counts.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<TenantRegistry>,
    pub authenticator: Arc<TokenAuthenticator>,
    pub issuer: Arc<TokenIssuer>,
    pub forwarder: ProxyForwarder,
}

impl AppState {
    pub fn new(config: Config, registry: TenantRegistry) -> ProxyResult<Self> {
        let forwarder = ProxyForwarder::new(
            config.backend_connect_timeout(),
            config.backend_response_timeout(),
        )?;

        Ok(Self {
            authenticator: Arc::new(TokenAuthenticator::new(&config.jwt_secret)),
            issuer: Arc::new(TokenIssuer::new(
                &config.jwt_secret,
                config.token_ttl_seconds,
            )),
            registry: Arc::new(registry),
            config: Arc::new(config),
            forwarder,
        })
    }
}

/// Load the tenant registry named by the configuration, or the built-in table
pub fn load_tenant_registry(config: &Config) -> Result<TenantRegistry, RegistryError> {
    match &config.tenant_registry_path {
        Some(path) => TenantRegistry::from_json_file(path),
        None => {
            tracing::warn!("TENANT_REGISTRY_PATH not set, using built-in tenant table");
            Ok(TenantRegistry::builtin())
        }
    }
}
