//! Mock provider implementation for testing.

use super::{ProviderError, RawResponse, TextProvider};
use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock answers with on every call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Succeed with this upstream body.
    Body(serde_json::Value),
    /// Fail as if the upstream returned this HTTP status.
    Status(u16),
    Timeout,
    NetworkFailure,
}

/// Mock text provider that records how it was called.
pub struct MockTextProvider {
    outcome: MockOutcome,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockTextProvider {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Succeeds with a well-formed single-candidate body carrying `text`.
    pub fn answering(text: &str) -> Self {
        Self::new(MockOutcome::Body(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _api_key: &SecretString,
    ) -> Result<RawResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        match &self.outcome {
            MockOutcome::Body(body) => Ok(RawResponse(body.clone())),
            MockOutcome::Status(status) => Err(ProviderError::ApiError {
                status: *status,
                status_text: "Mock failure".to_string(),
                body: "{\"error\":\"mock\"}".to_string(),
            }),
            MockOutcome::Timeout => Err(ProviderError::Timeout("mock timeout".to_string())),
            MockOutcome::NetworkFailure => Err(ProviderError::NetworkError(
                "mock connection refused".to_string(),
            )),
        }
    }
}
