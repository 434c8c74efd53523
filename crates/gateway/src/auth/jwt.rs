//! JWT token generation and validation

use std::collections::HashSet;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::Identity;

/// Clock skew tolerated when checking `exp`
const LEEWAY_SECONDS: u64 = 60;

/// JWT claims carried by gateway tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject the token speaks for. Older tokens call this `userId`.
    #[serde(rename = "subjectId", alias = "userId")]
    pub subject_id: String,
    /// Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration, only present when issued with a TTL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// JWT ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Signs tokens for a subject
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Option<Duration>,
}

impl TokenIssuer {
    /// Create an issuer; `ttl_seconds = None` issues tokens without `exp`
    pub fn new(secret: &str, ttl_seconds: Option<i64>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl: ttl_seconds.map(Duration::seconds),
        }
    }

    /// Issue a signed token for `subject_id`
    pub fn issue(&self, subject_id: &str) -> Result<String, JwtError> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            subject_id: subject_id.to_string(),
            iat: Some(now.unix_timestamp()),
            exp: self.ttl.map(|ttl| (now + ttl).unix_timestamp()),
            jti: Some(Uuid::new_v4().to_string()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))
    }
}

/// Verifies inbound tokens and turns them into an [`Identity`]
#[derive(Clone)]
pub struct TokenAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenAuthenticator {
    pub fn new(secret: &str) -> Self {
        // Pinning the algorithm rejects `none` and asymmetric-key confusion
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECONDS;
        // `exp` is checked when present but tokens issued without a TTL omit it
        validation.required_spec_claims = HashSet::new();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Resolve the identity behind an `Authorization` header value.
    ///
    /// Never fails: a missing, malformed, forged or expired token all come back
    /// as `None`, which the authorization gate treats as unauthenticated.
    pub fn authenticate(&self, header_value: Option<&str>) -> Option<Identity> {
        let token = header_value.and_then(strip_scheme)?;

        match self.verify(token) {
            Ok(claims) => Some(Identity::new(claims.subject_id)),
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected, continuing unauthenticated");
                None
            }
        }
    }

    /// Validate and decode a token
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidToken => JwtError::Invalid,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::Invalid,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => JwtError::Invalid,
                _ => JwtError::Validation(e.to_string()),
            })?;

        if claims.subject_id.is_empty() {
            return Err(JwtError::Validation("empty subject".to_string()));
        }
        Ok(claims)
    }
}

/// Accept both the raw token and `Bearer <token>`
fn strip_scheme(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => value[7..].trim_start(),
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Token encoding failed: {0}")]
    Encoding(String),
    #[error("Token validation failed: {0}")]
    Validation(String),
}
