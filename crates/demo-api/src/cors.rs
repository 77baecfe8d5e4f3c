//! Cross-origin resource sharing.
//!
//! The service allows every origin, method and request header, with
//! credentials. `tower_http::cors::CorsLayer` refuses to combine a wildcard
//! origin with credentials, so the policy is applied by a small middleware
//! instead.

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS,
    ACCESS_CONTROL_REQUEST_METHOD, ORIGIN, VARY,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

const ALL_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";

/// Preflight responses may be cached by the browser for this many seconds.
const PREFLIGHT_MAX_AGE_SECS: u32 = 600;

/// Process-wide CORS policy. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    max_age: HeaderValue,
}

impl CorsPolicy {
    /// Any origin, any method, any header, credentials allowed.
    pub fn permissive() -> Self {
        Self {
            max_age: HeaderValue::from(PREFLIGHT_MAX_AGE_SECS),
        }
    }

    /// Headers carried by every non-preflight response.
    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }

    fn preflight(&self, request_headers: Option<HeaderValue>) -> Response {
        let mut response = (StatusCode::OK, "OK").into_response();
        let headers = response.headers_mut();
        self.apply(headers);
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALL_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            request_headers.unwrap_or_else(|| HeaderValue::from_static("*")),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, self.max_age.clone());
        headers.insert(VARY, HeaderValue::from_static("Origin"));
        response
    }
}

/// An `OPTIONS` request carrying `Origin` and `Access-Control-Request-Method`.
pub fn is_preflight(request: &Request) -> bool {
    let headers = request.headers();
    request.method() == Method::OPTIONS
        && headers.contains_key(ORIGIN)
        && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}

/// Answers preflights directly and decorates every other response.
pub async fn cors(State(policy): State<CorsPolicy>, request: Request, next: Next) -> Response {
    if is_preflight(&request) {
        debug!(path = %request.uri().path(), "Answering CORS preflight");
        let requested = request
            .headers()
            .get(ACCESS_CONTROL_REQUEST_HEADERS)
            .cloned();
        return policy.preflight(requested);
    }

    let mut response = next.run(request).await;
    policy.apply(response.headers_mut());
    response
}
