//! Application configuration

use std::env;
use std::time::Duration;

/// Subject used by `/generate-token` when the caller does not name one
pub const DEFAULT_SUBJECT_ID: &str = "user1";

/// Gateway configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,

    // Tokens
    pub jwt_secret: String,
    pub token_ttl_seconds: Option<i64>,
    pub default_subject_id: String,
    pub enable_token_issuance: bool,

    // Tenants
    pub tenant_registry_path: Option<String>,

    // Upstream
    pub backend_connect_timeout_ms: u64,
    pub backend_response_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),

            // Tokens
            jwt_secret: {
                let secret =
                    env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
                if secret.len() < 32 {
                    return Err(ConfigError::WeakSecret(
                        "JWT_SECRET must be at least 32 characters",
                    ));
                }
                secret
            },
            token_ttl_seconds: match env::var("TOKEN_TTL_SECONDS") {
                Ok(raw) => {
                    let ttl: i64 = raw
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::Invalid("TOKEN_TTL_SECONDS"))?;
                    if ttl <= 0 {
                        return Err(ConfigError::Invalid("TOKEN_TTL_SECONDS"));
                    }
                    Some(ttl)
                }
                Err(_) => None,
            },
            default_subject_id: env::var("DEFAULT_SUBJECT_ID")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SUBJECT_ID.to_string()),
            enable_token_issuance: env::var("ENABLE_TOKEN_ISSUANCE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),

            // Tenants
            tenant_registry_path: env::var("TENANT_REGISTRY_PATH")
                .ok()
                .filter(|s| !s.is_empty()),

            // Upstream
            backend_connect_timeout_ms: env::var("BACKEND_CONNECT_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            backend_response_timeout_ms: env::var("BACKEND_RESPONSE_TIMEOUT_MS")
                .unwrap_or_else(|_| "30000".to_string())
                .parse()
                .unwrap_or(30000),
        })
    }

    pub fn backend_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_connect_timeout_ms)
    }

    pub fn backend_response_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_response_timeout_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Weak secret: {0}")]
    WeakSecret(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const OPTIONAL_VARS: &[&str] = &[
        "BIND_ADDRESS",
        "TOKEN_TTL_SECONDS",
        "DEFAULT_SUBJECT_ID",
        "ENABLE_TOKEN_ISSUANCE",
        "TENANT_REGISTRY_PATH",
        "BACKEND_CONNECT_TIMEOUT_MS",
        "BACKEND_RESPONSE_TIMEOUT_MS",
    ];

    fn setup_minimal_config() {
        for var in OPTIONAL_VARS {
            env::remove_var(var);
        }
        env::set_var(
            "JWT_SECRET",
            "test-jwt-secret-must-be-at-least-32-characters-long",
        );
    }

    fn cleanup_config() {
        env::remove_var("JWT_SECRET");
        for var in OPTIONAL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        setup_minimal_config();

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.token_ttl_seconds, None);
        assert_eq!(config.default_subject_id, "user1");
        assert!(config.enable_token_issuance);
        assert!(config.tenant_registry_path.is_none());
        assert_eq!(config.backend_connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.backend_response_timeout(), Duration::from_secs(30));

        cleanup_config();
    }

    #[test]
    #[serial]
    fn test_secret_validation() {
        setup_minimal_config();

        env::remove_var("JWT_SECRET");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));

        env::set_var("JWT_SECRET", "secret");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::WeakSecret(_))
        ));

        cleanup_config();
    }

    #[test]
    #[serial]
    fn test_overrides() {
        setup_minimal_config();
        env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
        env::set_var("TOKEN_TTL_SECONDS", "3600");
        env::set_var("DEFAULT_SUBJECT_ID", "ops");
        env::set_var("ENABLE_TOKEN_ISSUANCE", "false");
        env::set_var("TENANT_REGISTRY_PATH", "/etc/edgegate/tenants.json");
        env::set_var("BACKEND_CONNECT_TIMEOUT_MS", "250");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.token_ttl_seconds, Some(3600));
        assert_eq!(config.default_subject_id, "ops");
        assert!(!config.enable_token_issuance);
        assert_eq!(
            config.tenant_registry_path.as_deref(),
            Some("/etc/edgegate/tenants.json")
        );
        assert_eq!(config.backend_connect_timeout(), Duration::from_millis(250));

        cleanup_config();
    }

    #[test]
    #[serial]
    fn test_invalid_ttl_rejected() {
        setup_minimal_config();

        env::set_var("TOKEN_TTL_SECONDS", "soon");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("TOKEN_TTL_SECONDS"))
        ));

        env::set_var("TOKEN_TTL_SECONDS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("TOKEN_TTL_SECONDS"))
        ));

        cleanup_config();
    }
}
