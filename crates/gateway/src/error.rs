//! API error types and handling
//!
//! Gateway-generated failures are rendered as short plain-text bodies so that
//! tenant clients see the same responses whatever their backend speaks.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::proxy::ProxyError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Admission
    /// Unknown tenant, missing identity, or identity that does not own the tenant.
    /// Deliberately a single variant so callers cannot enumerate tenants.
    #[error("Forbidden")]
    Forbidden,
    #[error("404 Not found")]
    NotFound,

    // Upstream
    #[error("Bad Gateway")]
    BadGateway,
    #[error("Gateway Timeout")]
    GatewayTimeout,

    // Internal
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadGateway => StatusCode::BAD_GATEWAY,
            ApiError::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::Timeout(_) => ApiError::GatewayTimeout,
            ProxyError::Client(_) => ApiError::Internal,
            ProxyError::InvalidBackend { .. }
            | ProxyError::Unreachable(_)
            | ProxyError::Upstream(_) => ApiError::BadGateway,
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
