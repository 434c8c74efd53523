//! HTTP routes
//!
//! Utility endpoints are matched by method and path before anything else and
//! never touch tenant resolution. Every other request, including non-GET
//! requests to a utility path, falls through to the admission pipeline in
//! [`gateway::admit`].

pub mod gateway;
pub mod health;
pub mod tokens;

use axum::{
    handler::Handler,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{auth::authenticate, security::security_headers_middleware, state::AppState};

/// Create the gateway router
pub fn create_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/test", utility(health::test_greeting))
        .route("/_gateway/health", utility(health::health))
        .route("/_gateway/health/live", utility(health::liveness));

    if state.config.enable_token_issuance {
        router = router.route("/generate-token", utility(tokens::generate_token));
    } else {
        tracing::info!("Token issuance endpoint disabled");
    }

    router
        .fallback(gateway::admit)
        // Authentication runs for every route, before routing decisions
        .layer(middleware::from_fn_with_state(
            state.authenticator.clone(),
            authenticate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET-only gateway endpoint; any other method on the path goes to admission
fn utility<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler)
        // Security headers cover the GET handler only, not the admission fallback
        .route_layer(middleware::from_fn(security_headers_middleware))
        .fallback(gateway::admit)
}
