// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cleanup and parsing of model replies.
//!
//! Models wrap JSON in markdown fences even when told not to, so every
//! reply goes through `strip_code_fences` before parsing.

use serde::de::DeserializeOwned;

/// Errors from AI providers and the media host.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("model output is not valid JSON: {0}")]
    InvalidJson(String),
}

impl AiError {
    /// Transport failure with the request URL stripped.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        AiError::Request(err.without_url().to_string())
    }

    /// Build from a failed HTTP exchange, keeping a bounded body excerpt.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        AiError::Status {
            status,
            body: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
        }
    }
}

const MAX_ERROR_BODY_CHARS: usize = 500;

/// First `max` characters of `text`, never splitting a UTF-8 sequence.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Remove markdown code fences (```json / ```) and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Strip fences and deserialize a model reply.
pub fn parse_ai_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    serde_json::from_str(&cleaned).map_err(|e| AiError::InvalidJson(e.to_string()))
}
