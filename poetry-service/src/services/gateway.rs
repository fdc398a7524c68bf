//! Per-request chat pipeline.
//!
//! validate -> readiness -> credentials -> prompt -> upstream -> extract.
//! The first failing step ends the request; nothing is retried.

use crate::models::ChatResponse;
use crate::services::content_store::ContentStore;
use crate::services::extract::{ResponseExtractor, ShapeError};
use crate::services::prompt::PromptBuilder;
use crate::services::providers::{ProviderError, TextProvider};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("query is missing or empty")]
    Validation,

    #[error("poetry book content is not loaded")]
    NotReady,

    #[error("upstream API key is not configured")]
    Configuration,

    #[error("upstream call failed: {0}")]
    Upstream(#[from] ProviderError),

    #[error("upstream response could not be navigated: {0}")]
    Shape(#[from] ShapeError),
}

impl ChatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Upstream detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ChatError::Validation => "Query is required in the request body.",
            ChatError::NotReady => {
                "Poetry book content not loaded on server. Please try again in a moment or check server logs."
            }
            ChatError::Configuration => "Server configuration error: API key missing.",
            ChatError::Upstream(ProviderError::Timeout(_)) => {
                "Network timeout when connecting to AI. Check server's internet or firewall."
            }
            ChatError::Upstream(ProviderError::ApiError { .. }) => {
                "AI service returned an error. See server logs for details."
            }
            ChatError::Upstream(ProviderError::NotConfigured(_)) => {
                "Server configuration error: API key missing."
            }
            ChatError::Upstream(_) => {
                "Backend server error during AI interaction. Please check server logs."
            }
            ChatError::Shape(_) => {
                "Failed to get a valid response from the AI. Unexpected structure."
            }
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: &'static str,
        }

        let status = self.status_code();
        match &self {
            ChatError::Upstream(ProviderError::ApiError {
                status: upstream_status,
                status_text,
                body,
            }) => tracing::error!(
                status = *upstream_status,
                status_text = %status_text,
                body = %body,
                "Gemini API returned an error status"
            ),
            _ if status.is_server_error() => tracing::error!(error = %self, "Chat request failed"),
            _ => tracing::debug!(error = %self, "Chat request rejected"),
        }

        (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}

/// Composes the content store, prompt builder, provider and extractor.
#[derive(Clone)]
pub struct ChatGateway {
    content: ContentStore,
    provider: Arc<dyn TextProvider>,
    api_key: Option<SecretString>,
}

impl ChatGateway {
    pub fn new(
        content: ContentStore,
        provider: Arc<dyn TextProvider>,
        api_key: Option<SecretString>,
    ) -> Self {
        Self {
            content,
            provider,
            api_key,
        }
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub async fn answer(&self, query: Option<&str>) -> Result<ChatResponse, ChatError> {
        let query = query
            .filter(|q| !q.trim().is_empty())
            .ok_or(ChatError::Validation)?;

        let book = self.content.text().ok_or(ChatError::NotReady)?;

        let api_key = self.api_key.as_ref().ok_or(ChatError::Configuration)?;

        let prompt = PromptBuilder::build(book, query);

        let raw = self.provider.generate(&prompt, api_key).await?;

        let response = ResponseExtractor::extract(raw)?;

        tracing::info!(
            query_len = query.len(),
            answer_len = response.len(),
            "Chat answered"
        );
        Ok(ChatResponse { response })
    }
}
