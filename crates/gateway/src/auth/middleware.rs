//! Authentication middleware
//!
//! Runs on every route. Whatever the `Authorization` header holds, the request
//! continues; the verified identity (or its absence) is attached as a
//! [`RequestContext`] for the admission handler to consume.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::TokenAuthenticator;
use crate::context::RequestContext;

pub async fn authenticate(
    State(authenticator): State<Arc<TokenAuthenticator>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = authenticator.authenticate(
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    );

    request
        .extensions_mut()
        .insert(RequestContext::new(identity));

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenIssuer;
    use axum::{body::Body, extract::Extension, routing::get, Router};
    use tower::ServiceExt;

    const SECRET: &str = "test-secret-key-at-least-32-chars!";

    async fn whoami(Extension(ctx): Extension<RequestContext>) -> String {
        ctx.identity()
            .map(|identity| identity.subject_id().to_string())
            .unwrap_or_else(|| "anonymous".to_string())
    }

    fn app() -> Router {
        let authenticator = Arc::new(TokenAuthenticator::new(SECRET));
        Router::new()
            .route("/whoami", get(whoami))
            .layer(axum::middleware::from_fn_with_state(
                authenticator,
                authenticate,
            ))
    }

    async fn call(authorization: Option<&str>) -> String {
        let mut request = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let token = TokenIssuer::new(SECRET, None).issue("user1").unwrap();
        assert_eq!(call(Some(&token)).await, "user1");
    }

    #[tokio::test]
    async fn test_invalid_or_missing_token_continues_anonymously() {
        assert_eq!(call(None).await, "anonymous");
        assert_eq!(call(Some("garbage")).await, "anonymous");
    }
}
