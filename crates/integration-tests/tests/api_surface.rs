//! API surface tests driven through the real router.
//!
//! The router sits over a lazily-connected pool that never reaches a
//! database, so anything that makes it past the middleware stack fails
//! with a 500 from the pool. That boundary is exactly what these tests
//! use: a 403 proves the CSRF layer fired, a 401 proves the auth
//! extractor fired, and a 500 proves the request passed both.

use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use octocat_supply_integration_tests::{api_request, body_json, test_app};

const SUPPLIER_JSON: &str = r#"{
    "name": "Acme Components",
    "description": "Robotic arms",
    "contactPerson": "Mona Lisa",
    "email": "sales@acme.example",
    "phone": "555-0100"
}"#;

#[tokio::test]
async fn health_returns_ok() {
    let response = test_app()
        .oneshot(api_request("GET", "/health", None, None))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = test_app()
        .oneshot(api_request("GET", "/api/nonsense", None, None))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutating_request_without_csrf_is_rejected() {
    let response = test_app()
        .oneshot(api_request("POST", "/api/suppliers", None, Some(SUPPLIER_JSON)))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "CSRF_TOKEN_MISMATCH");
}

#[tokio::test]
async fn mismatched_csrf_tokens_are_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/suppliers")
        .header("x-forwarded-for", "127.0.0.1")
        .header(header::COOKIE, "csrfToken=aaaa")
        .header("x-csrf-token", "bbbb")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(SUPPLIER_JSON))
        .expect("well-formed request");

    let response = test_app().oneshot(request).await.expect("infallible");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "CSRF_TOKEN_MISMATCH");
}

#[tokio::test]
async fn csrf_token_endpoint_issues_cookie_and_body() {
    let response = test_app()
        .oneshot(api_request("GET", "/api/auth/csrf-token", None, None))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie header")
        .to_owned();
    assert!(cookie.starts_with("csrfToken="));
    assert!(cookie.contains("SameSite=Strict"));

    let body = body_json(response).await;
    let token = body["csrfToken"].as_str().expect("token in body");
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(cookie.contains(token));
}

#[tokio::test]
async fn matching_csrf_tokens_pass_the_middleware() {
    let token = "3f".repeat(32);
    let response = test_app()
        .oneshot(api_request(
            "POST",
            "/api/suppliers",
            Some(&token),
            Some(SUPPLIER_JSON),
        ))
        .await
        .expect("infallible");

    // Past the CSRF check, the unreachable database is the next failure.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"]["message"], "Internal server error");
}

#[tokio::test]
async fn get_requests_skip_the_csrf_check() {
    let response = test_app()
        .oneshot(api_request("GET", "/api/suppliers", None, None))
        .await
        .expect("infallible");

    assert_ne!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn me_without_a_session_is_401() {
    let response = test_app()
        .oneshot(api_request("GET", "/api/auth/me", None, None))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn auth_burst_is_rate_limited() {
    // One router, one client IP: the strict auth limiter allows a burst of
    // five, so the sixth request in quick succession is turned away.
    let app = test_app();
    let mut last = StatusCode::OK;
    for _ in 0..6 {
        let response = app
            .clone()
            .oneshot(api_request("GET", "/api/auth/csrf-token", None, None))
            .await
            .expect("infallible");
        last = response.status();
    }
    assert_eq!(last, StatusCode::TOO_MANY_REQUESTS);
}
