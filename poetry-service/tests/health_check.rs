//! Health endpoint tests.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_json, TestAppBuilder};
use poetry_service::services::ContentStore;
use tower::util::ServiceExt;

fn health_request() -> Request<Body> {
    Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_reports_loaded_book() {
    let app = TestAppBuilder::default().build();

    let response = app.router.oneshot(health_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "poetry-service-test");
    assert_eq!(body["poetryLoaded"], true);
}

#[tokio::test]
async fn health_reports_pending_book() {
    let app = TestAppBuilder::default()
        .content(ContentStore::pending())
        .build();

    let response = app.router.oneshot(health_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["poetryLoaded"], false);
}

#[tokio::test]
async fn health_applies_origin_policy() {
    let app = TestAppBuilder::default().build();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
