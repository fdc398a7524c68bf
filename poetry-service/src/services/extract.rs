//! Pulls the answer text out of a Gemini `generateContent` body.
//!
//! Path: `candidates[0].content.parts[0].text`. Every hop is optional in the
//! wire types so a missing link becomes a [`ShapeError`] naming the hop.

use crate::services::providers::RawResponse;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShapeError {
    #[error("response body has an unexpected layout: {0}")]
    Malformed(String),

    #[error("response has no candidates")]
    NoCandidates,

    #[error("first candidate has no content")]
    NoContent,

    #[error("candidate content has no parts")]
    NoParts,

    #[error("first part has no text")]
    NoText,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

pub struct ResponseExtractor;

impl ResponseExtractor {
    pub fn extract(raw: RawResponse) -> Result<String, ShapeError> {
        let response: GenerateContentResponse =
            serde_json::from_value(raw.0).map_err(|e| ShapeError::Malformed(e.to_string()))?;

        let candidate = response
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or(ShapeError::NoCandidates)?;
        let content = candidate.content.ok_or(ShapeError::NoContent)?;
        let part = content
            .parts
            .and_then(|p| p.into_iter().next())
            .ok_or(ShapeError::NoParts)?;

        part.text.ok_or(ShapeError::NoText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(value: serde_json::Value) -> Result<String, ShapeError> {
        ResponseExtractor::extract(RawResponse(value))
    }

    #[test]
    fn returns_first_part_text_verbatim() {
        let text = extract(json!({
            "candidates": [
                { "content": { "parts": [
                    { "text": "Example answer. BUTTONS: Poem 1, Theme A" },
                    { "text": "ignored" }
                ] } },
                { "content": { "parts": [{ "text": "second candidate" }] } }
            ],
            "usageMetadata": { "promptTokenCount": 10 }
        }))
        .unwrap();

        assert_eq!(text, "Example answer. BUTTONS: Poem 1, Theme A");
    }

    #[test]
    fn each_missing_link_is_reported() {
        assert_eq!(extract(json!({})), Err(ShapeError::NoCandidates));
        assert_eq!(
            extract(json!({ "candidates": [] })),
            Err(ShapeError::NoCandidates)
        );
        assert_eq!(
            extract(json!({ "candidates": [{ "finishReason": "SAFETY" }] })),
            Err(ShapeError::NoContent)
        );
        assert_eq!(
            extract(json!({ "candidates": [{ "content": {} }] })),
            Err(ShapeError::NoParts)
        );
        assert_eq!(
            extract(json!({ "candidates": [{ "content": { "parts": [] } }] })),
            Err(ShapeError::NoParts)
        );
        assert_eq!(
            extract(json!({ "candidates": [{ "content": { "parts": [{}] } }] })),
            Err(ShapeError::NoText)
        );
    }

    #[test]
    fn nulls_are_treated_as_missing() {
        assert_eq!(
            extract(json!({ "candidates": null })),
            Err(ShapeError::NoCandidates)
        );
        assert_eq!(
            extract(json!({ "candidates": [{ "content": { "parts": [{ "text": null }] } }] })),
            Err(ShapeError::NoText)
        );
    }

    #[test]
    fn wrong_types_are_malformed_not_panics() {
        assert!(matches!(
            extract(json!({ "candidates": "nope" })),
            Err(ShapeError::Malformed(_))
        ));
        assert!(matches!(extract(json!([1, 2, 3])), Err(ShapeError::Malformed(_))));
        assert!(matches!(
            extract(json!({ "candidates": [{ "content": { "parts": [{ "text": 42 }] } }] })),
            Err(ShapeError::Malformed(_))
        ));
    }
}
