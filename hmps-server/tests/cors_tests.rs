//! CORS layer tests
mod common;

use crate::common::{degraded_state, ready_state};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hmps_server::build_router;
use tower::ServiceExt;

#[tokio::test]
async fn test_origin_is_mirrored_with_credentials() {
    let (state, _pool) = ready_state().await;
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/api/status")
        .header("origin", "https://hmps.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://hmps.example"
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_preflight_lists_the_declared_methods() {
    let (state, _pool) = ready_state().await;
    let app = build_router(state);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/users/")
        .header("origin", "https://hmps.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let methods = response
        .headers()
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PUT", "DELETE"] {
        assert!(methods.contains(method), "missing {} in {}", method, methods);
    }

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-headers")
            .unwrap(),
        "content-type"
    );
}

#[tokio::test]
async fn test_cors_headers_cover_stub_responses() {
    let state = degraded_state("connection refused").await;
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/api/users/")
        .header("origin", "https://hmps.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://hmps.example"
    );
}
