//! Admission pipeline
//!
//! `resolve tenant -> authorize -> forward`, with the caller's identity
//! already attached by the authentication middleware:
//!
//! - no tenant in the host: 404
//! - unknown tenant, no identity, or not the owner: 403
//! - backend unreachable: 502 (504 when it never answers)
//! - otherwise the backend's own response, streamed

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};

use crate::{
    auth::{authorize, Decision, Identity},
    context::{Outcome, RequestContext},
    error::ApiError,
    routing::{request_host, resolve_tenant},
    state::AppState,
};

pub async fn admit(State(state): State<AppState>, mut request: Request) -> Response {
    let mut ctx = request
        .extensions_mut()
        .remove::<RequestContext>()
        .unwrap_or_default();

    let Some(tenant_id) = request_host(&request).and_then(resolve_tenant) else {
        ctx.conclude(Outcome::NotFound);
        return ApiError::NotFound.into_response();
    };
    ctx.resolve_tenant(tenant_id.as_str());

    let backend_address = match authorize(&tenant_id, &state.registry, ctx.identity()) {
        Decision::Proceed { backend_address } => backend_address,
        Decision::Forbidden => {
            ctx.conclude(Outcome::Forbidden);
            return ApiError::Forbidden.into_response();
        }
    };

    tracing::info!(
        tenant_id = %tenant_id,
        subject_id = ctx.identity().map(Identity::subject_id).unwrap_or("-"),
        backend = backend_address,
        method = %request.method(),
        path = request.uri().path(),
        "Proxying request"
    );

    match state.forwarder.forward(backend_address, request).await {
        Ok(response) => {
            ctx.conclude(Outcome::Proxied);
            response
        }
        Err(e) => {
            tracing::warn!(
                tenant_id = %tenant_id,
                backend = backend_address,
                error = %e,
                "Upstream request failed"
            );
            ctx.conclude(Outcome::UpstreamFailed);
            ApiError::from(e).into_response()
        }
    }
}
