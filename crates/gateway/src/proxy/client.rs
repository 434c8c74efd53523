//! HTTP client for tenant backends

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::{
    body::{Body, HttpBody},
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, HeaderName, HeaderValue, Uri},
    response::Response,
};
use futures::TryStreamExt;
use reqwest::{redirect, Client};
use url::Url;

use super::headers::strip_hop_by_hop;

/// Idle connections kept per backend
const POOL_MAX_IDLE_PER_HOST: usize = 10;

static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
static X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
static X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Error type for upstream forwarding
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Invalid backend address '{address}': {reason}")]
    InvalidBackend { address: String, reason: String },

    #[error("Backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Backend did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    #[error("HTTP client construction failed: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type for forwarding operations
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Forwards requests to tenant backends over a shared connection pool.
///
/// Holds no per-request state and performs no retries: a failed attempt is
/// reported to the caller straight away.
#[derive(Clone)]
pub struct ProxyForwarder {
    client: Client,
    response_timeout: Duration,
}

impl ProxyForwarder {
    /// Create a forwarder.
    ///
    /// `connect_timeout` bounds establishing the backend connection and
    /// `response_timeout` bounds the wait for response headers. The response
    /// body itself is not time-limited so long-lived streams keep flowing.
    pub fn new(connect_timeout: Duration, response_timeout: Duration) -> ProxyResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()
            .map_err(ProxyError::Client)?;

        Ok(Self {
            client,
            response_timeout,
        })
    }

    /// Forward `request` to `backend_address` and stream the backend's response back
    pub async fn forward(&self, backend_address: &str, request: Request) -> ProxyResult<Response> {
        let target = target_url(backend_address, request.uri())?;
        let peer_ip = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        let (parts, body) = request.into_parts();
        let mut headers = parts.headers;
        let original_host = headers.get(header::HOST).cloned();
        strip_hop_by_hop(&mut headers);
        // reqwest derives Host from the target URL
        headers.remove(header::HOST);
        set_forwarded_headers(&mut headers, peer_ip, original_host);

        tracing::debug!(method = %parts.method, url = %target, "Forwarding request upstream");

        let mut upstream = self
            .client
            .request(parts.method, target)
            .headers(headers);
        if !body.is_end_stream() {
            upstream = upstream.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let response = match tokio::time::timeout(self.response_timeout, upstream.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_connect() => return Err(ProxyError::Unreachable(e)),
            Ok(Err(e)) => return Err(ProxyError::Upstream(e)),
            Err(_) => return Err(ProxyError::Timeout(self.response_timeout)),
        };

        Ok(relay(response))
    }
}

/// Build the upstream URL from a backend address and the inbound request URI.
///
/// Addresses without a scheme are treated as plain HTTP hosts, matching
/// in-cluster service names such as `project1-service.default.svc.cluster.local`.
pub fn target_url(backend_address: &str, uri: &Uri) -> ProxyResult<Url> {
    let invalid = |reason: String| ProxyError::InvalidBackend {
        address: backend_address.to_string(),
        reason,
    };

    let address = backend_address.trim();
    let base = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    };

    let mut url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    let request_path = match uri.path() {
        "" => "/",
        path => path,
    };
    let path = format!("{}{}", url.path().trim_end_matches('/'), request_path);
    url.set_path(&path);
    url.set_query(uri.query());
    Ok(url)
}

fn set_forwarded_headers(
    headers: &mut HeaderMap,
    peer_ip: Option<IpAddr>,
    original_host: Option<HeaderValue>,
) {
    if let Some(ip) = peer_ip {
        let forwarded_for = match headers
            .get(&X_FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
        {
            Some(existing) => format!("{}, {}", existing, ip),
            None => ip.to_string(),
        };
        if let Ok(value) = HeaderValue::from_str(&forwarded_for) {
            headers.insert(X_FORWARDED_FOR.clone(), value);
        }
    }

    if let Some(host) = original_host {
        headers.insert(X_FORWARDED_HOST.clone(), host);
    }

    if !headers.contains_key(&X_FORWARDED_PROTO) {
        headers.insert(X_FORWARDED_PROTO.clone(), HeaderValue::from_static("http"));
    }
}

/// Turn the backend response into the client response without buffering the body
fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);

    let url = upstream.url().clone();
    let stream = upstream.bytes_stream().inspect_err(move |e| {
        tracing::warn!(url = %url, error = %e, "Upstream body stream failed");
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
