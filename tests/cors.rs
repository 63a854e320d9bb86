//! Integration tests for the cross-origin policy.
//!
//! Verifies that:
//! - allow-listed origins are echoed back with credentials allowed
//! - origins outside the list get no Access-Control-Allow-Origin header
//! - preflight requests mirror the requested method and headers

use std::sync::Arc;

use axum::body::Body;
use http::Request;
use tower::ServiceExt;

use knowself::config::Config;
use knowself::proxy::{create_router, AppState};

fn test_app() -> axum::Router {
    let config = Config::from_lookup(|name| match name {
        "API_KEY" => Some("sk-test".to_string()),
        _ => None,
    })
    .unwrap();

    let state = AppState {
        config: Arc::new(config),
        http_client: reqwest::Client::new(),
    };
    create_router(state)
}

#[tokio::test]
async fn test_allowed_origin_is_echoed() {
    let app = test_app();

    let request = Request::get("/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), http::StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .expect("allow-origin header present"),
        "http://localhost:5173"
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .expect("allow-credentials header present"),
        "true"
    );
}

#[tokio::test]
async fn test_production_origin_is_allowed() {
    let app = test_app();

    let request = Request::get("/health")
        .header("origin", "https://yippee701.github.io")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .expect("allow-origin header present"),
        "https://yippee701.github.io"
    );
}

#[tokio::test]
async fn test_unlisted_origin_gets_no_allow_origin() {
    let app = test_app();

    let request = Request::get("/health")
        .header("origin", "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // The request itself still succeeds; the browser enforces the policy
    // from the missing header.
    assert_eq!(response.status(), http::StatusCode::OK);
    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none(),
        "Unlisted origin must not be echoed back"
    );
}

#[tokio::test]
async fn test_preflight_mirrors_method_and_headers() {
    let app = test_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/chat")
        .header("origin", "http://localhost:5174")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .expect("allow-origin header present"),
        "http://localhost:5174"
    );
    let allow_methods = response
        .headers()
        .get("access-control-allow-methods")
        .expect("allow-methods header present")
        .to_str()
        .unwrap();
    assert!(allow_methods.contains("POST"), "got: {}", allow_methods);
    let allow_headers = response
        .headers()
        .get("access-control-allow-headers")
        .expect("allow-headers header present")
        .to_str()
        .unwrap();
    assert!(
        allow_headers.contains("content-type"),
        "got: {}",
        allow_headers
    );
}

#[tokio::test]
async fn test_preflight_for_unlisted_origin_not_echoed() {
    let app = test_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/chat")
        .header("origin", "https://evil.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}
