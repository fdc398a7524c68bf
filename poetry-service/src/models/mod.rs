use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`. `query` is optional on the wire so that a missing
/// field is reported as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Raw answer text, including any trailing `BUTTONS: ...` line.
    pub response: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
    pub poetry_loaded: bool,
}
