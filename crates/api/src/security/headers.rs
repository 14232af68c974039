//! Security Headers Middleware
//!
//! Sets a fixed policy of response headers on every response leaving the
//! service: HSTS, XSS protection, CSP, MIME sniffing, referrer, framing and
//! browser feature restrictions. Values are overwritten, never appended.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Request, Response},
    middleware::Next,
};
use std::sync::Arc;

/// A `connect-src` origin that would break out of its directive or the header value
#[derive(Debug, thiserror::Error)]
pub enum InvalidPolicy {
    #[error("Invalid connect-src origin: {0:?}")]
    Origin(String),
    #[error("Invalid Content-Security-Policy: {0}")]
    HeaderValue(String),
}

/// An origin is a single CSP source expression: non-empty, no separators
fn check_origin(origin: &str) -> Result<(), InvalidPolicy> {
    if origin.is_empty()
        || origin
            .chars()
            .any(|c| c == ';' || c == ',' || c.is_whitespace() || c.is_control())
    {
        return Err(InvalidPolicy::Origin(origin.to_string()));
    }
    Ok(())
}

/// The full set of security headers, built once at startup
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecurityHeaders {
    /// Build the policy with the given `connect-src` origins (listed after `'self'`)
    pub fn new<S: AsRef<str>>(connect_src: &[S]) -> Result<Self, InvalidPolicy> {
        for origin in connect_src {
            check_origin(origin.as_ref())?;
        }

        let csp = content_security_policy(connect_src);
        let csp = HeaderValue::from_str(&csp).map_err(|_| InvalidPolicy::HeaderValue(csp.clone()))?;

        let headers = vec![
            // HSTS: Force HTTPS
            (
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static("max-age=31536000; includeSubDomains"),
            ),
            (header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block")),
            (header::CONTENT_SECURITY_POLICY, csp),
            // Prevent MIME type sniffing
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ),
            // Prevent clickjacking (legacy browsers; CSP frame-ancestors covers the rest)
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
            // Not among the `http` crate's header constants
            (
                HeaderName::from_static("permissions-policy"),
                HeaderValue::from_static(
                    "accelerometer=(), camera=(), geolocation=(), gyroscope=(), \
                     magnetometer=(), microphone=(), payment=(), usb=()",
                ),
            ),
        ];

        Ok(Self { headers })
    }

    /// Set every policy header on `headers`, replacing existing values
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
    }
}

/// Assemble the CSP directive list
pub fn content_security_policy<S: AsRef<str>>(connect_src: &[S]) -> String {
    let mut connect = String::from("connect-src 'self'");
    for origin in connect_src {
        connect.push(' ');
        connect.push_str(origin.as_ref());
    }

    [
        "default-src 'self'",
        "img-src 'self' data: https: http:",
        "script-src 'self' 'unsafe-inline' 'unsafe-eval'",
        "style-src 'self' 'unsafe-inline'",
        "font-src 'self' data: https:",
        connect.as_str(),
        "frame-ancestors 'none'",
        "base-uri 'self'",
        "form-action 'self'",
    ]
    .join("; ")
}

/// Middleware that adds security headers to all responses
pub async fn security_headers_middleware(
    State(policy): State<Arc<SecurityHeaders>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let mut response = next.run(request).await;
    policy.apply(response.headers_mut());
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONNECT_SRC;
    use crate::error::ApiError;
    use axum::{
        http::{Method, StatusCode},
        response::IntoResponse,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    const EXPECTED_CSP: &str = "default-src 'self'; img-src 'self' data: https: http:; \
        script-src 'self' 'unsafe-inline' 'unsafe-eval'; style-src 'self' 'unsafe-inline'; \
        font-src 'self' data: https:; connect-src 'self' https://*.amazonaws.com \
        https://*.snapped.cc https://*.b-cdn.net https://*.cloudfront.net; \
        frame-ancestors 'none'; base-uri 'self'; form-action 'self'";

    fn policy() -> Arc<SecurityHeaders> {
        Arc::new(SecurityHeaders::new(&DEFAULT_CONNECT_SRC).unwrap())
    }

    fn app(router: Router) -> Router {
        router.layer(axum::middleware::from_fn_with_state(
            policy(),
            security_headers_middleware,
        ))
    }

    fn assert_policy_headers(headers: &HeaderMap) {
        let expected = [
            ("strict-transport-security", "max-age=31536000; includeSubDomains"),
            ("x-xss-protection", "1; mode=block"),
            ("content-security-policy", EXPECTED_CSP),
            ("x-content-type-options", "nosniff"),
            ("referrer-policy", "strict-origin-when-cross-origin"),
            ("x-frame-options", "DENY"),
            (
                "permissions-policy",
                "accelerometer=(), camera=(), geolocation=(), gyroscope=(), \
                 magnetometer=(), microphone=(), payment=(), usb=()",
            ),
        ];
        for (name, value) in expected {
            let values: Vec<_> = headers.get_all(name).iter().collect();
            assert_eq!(values, vec![value], "header {name}");
        }
    }

    async fn test_handler() -> &'static str {
        "ok"
    }

    #[test]
    fn test_default_csp_matches_literal() {
        assert_eq!(content_security_policy(&DEFAULT_CONNECT_SRC), EXPECTED_CSP);
    }

    #[test]
    fn test_policy_has_seven_headers() {
        let mut headers = HeaderMap::new();
        policy().apply(&mut headers);
        assert_eq!(headers.len(), 7);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let policy = policy();
        let mut headers = HeaderMap::new();
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
        headers.append(header::X_FRAME_OPTIONS, HeaderValue::from_static("ALLOW-FROM x"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        policy.apply(&mut headers);
        let once = headers.clone();
        policy.apply(&mut headers);

        assert_eq!(headers, once);
        assert_eq!(headers.len(), 8);
        assert_policy_headers(&headers);
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn test_custom_connect_src() {
        let policy = SecurityHeaders::new(&["https://uploads.example.com"]).unwrap();
        let mut headers = HeaderMap::new();
        policy.apply(&mut headers);

        let csp = headers.get(header::CONTENT_SECURITY_POLICY).unwrap().to_str().unwrap();
        assert!(csp.contains("; connect-src 'self' https://uploads.example.com; "));
        assert!(csp.contains("frame-ancestors 'none'"));
    }

    #[test]
    fn test_invalid_connect_src_rejected() {
        assert!(SecurityHeaders::new(&["https://bad\nhost"]).is_err());
    }

    #[test]
    fn test_connect_src_cannot_inject_directives() {
        for origin in [
            "https://x; script-src *",
            "https://x;script-src",
            "https://a.example.com,https://b.example.com",
            "https://a.example.com https://b.example.com",
            "https://a.example.com\t",
            "",
        ] {
            assert!(
                matches!(SecurityHeaders::new(&[origin]), Err(InvalidPolicy::Origin(_))),
                "origin {origin:?} should be rejected"
            );
        }

        // Rejected even when a valid origin comes first
        assert!(SecurityHeaders::new(&["https://ok.example.com", "https://x; script-src *"]).is_err());
    }

    #[tokio::test]
    async fn test_security_headers_are_added() {
        let app = app(Router::new().route("/", get(test_handler)));

        for method in [Method::GET, Method::HEAD] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_policy_headers(response.headers());
        }
    }

    #[tokio::test]
    async fn test_handler_headers_are_overwritten() {
        let app = app(Router::new().route(
            "/",
            get(|| async { ([(header::X_FRAME_OPTIONS, "SAMEORIGIN")], "framed") }),
        ));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_policy_headers(response.headers());
    }

    #[tokio::test]
    async fn test_error_responses_carry_headers() {
        let app = app(Router::new().route(
            "/fail",
            get(|| async { Err::<&'static str, _>(ApiError::Internal) }),
        ));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/fail").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_policy_headers(response.headers());

        // Unrouted path: fallback 404 also passes through the layer
        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_policy_headers(response.headers());
    }

    #[tokio::test]
    async fn test_status_and_body_untouched() {
        let app = app(Router::new().route(
            "/",
            get(|| async { (StatusCode::ACCEPTED, "queued").into_response() }),
        ));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"queued");
    }
}
