//! Shared helpers for router-level tests.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use poetry_service::services::providers::mock::MockTextProvider;
use poetry_service::services::{ChatGateway, ContentStore};
use poetry_service::startup::{build_router, AppState};
use secrecy::SecretString;
use service_core::middleware::cors::OriginValidator;
use std::path::PathBuf;
use std::sync::Arc;

pub const BOOK: &str = "## Poem 1: Echoes of Dawn\nBefore the gulls, before the bell.\n\n## Themes Explored\nMemory.";
pub const GOOD_ORIGIN: &str = "https://good.example";

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<MockTextProvider>,
}

pub struct TestAppBuilder {
    content: ContentStore,
    provider: MockTextProvider,
    api_key: Option<SecretString>,
    frontend_dir: Option<PathBuf>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            content: ContentStore::from_text(BOOK).expect("book is not blank"),
            provider: MockTextProvider::answering("Example answer. BUTTONS: Poem 1, Theme A"),
            api_key: Some(SecretString::new("test-api-key".to_string())),
            frontend_dir: None,
        }
    }
}

impl TestAppBuilder {
    pub fn content(mut self, content: ContentStore) -> Self {
        self.content = content;
        self
    }

    pub fn provider(mut self, provider: MockTextProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn frontend_dir(mut self, dir: PathBuf) -> Self {
        self.frontend_dir = Some(dir);
        self
    }

    pub fn build(self) -> TestApp {
        let provider = Arc::new(self.provider);
        let state = AppState {
            service_name: Arc::from("poetry-service-test"),
            gateway: Arc::new(ChatGateway::new(
                self.content,
                provider.clone(),
                self.api_key,
            )),
            origins: Arc::new(OriginValidator::allow_list([GOOD_ORIGIN])),
            frontend_dir: self.frontend_dir,
        };

        TestApp {
            router: build_router(state),
            provider,
        }
    }
}

pub fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}
