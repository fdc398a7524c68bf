//! Upstream AI provider abstraction.
//!
//! The gateway talks to a [`TextProvider`]; production uses Gemini, tests
//! use the mock.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error {status} {status_text}")]
    ApiError {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Failed to decode response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors may embed the request URL, which carries the key.
        let err = err.without_url();
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::NetworkError(err.to_string())
        }
    }
}

/// Sampling parameters sent with every request. Not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

pub const GENERATION_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.5,
    top_p: 0.9,
    top_k: 40,
    max_output_tokens: 1000,
};

/// Parsed JSON body of a successful upstream call, not yet navigated.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse(pub serde_json::Value);

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one prompt and return the upstream body.
    ///
    /// Implementations must not touch the network when `api_key` is blank.
    async fn generate(
        &self,
        prompt: &str,
        api_key: &SecretString,
    ) -> Result<RawResponse, ProviderError>;
}
