// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mistral chat completion client used for plan generation.

use crate::services::ai_json::AiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token budget for workout plans (several weeks of exercises).
pub const WORKOUT_MAX_TOKENS: u32 = 20_000;
/// Token budget for a week of meals.
pub const MEAL_MAX_TOKENS: u32 = 18_000;

/// Mistral API client.
#[derive(Clone)]
pub struct MistralClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<Value>,
}

impl MistralClient {
    pub fn new(base_url: &str, api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    /// Send a single user prompt and return the first choice's text.
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, AiError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            max_tokens,
            prompt_len = prompt.len(),
            "Sending chat completion"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(AiError::transport)?;

        if !response.status().is_success() {
            let err = AiError::from_response(response).await;
            tracing::warn!(error = %err, "Mistral request failed");
            return Err(err);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| {
                AiError::Request(format!("Invalid completion body: {}", e.without_url()))
            })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(content_text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        tracing::debug!(reply_len = text.len(), "Chat completion received");
        Ok(text)
    }
}

/// Content is a string, or a list of chunks when the model streams parts.
fn content_text(content: Value) -> String {
    match content {
        Value::String(s) => s,
        Value::Array(chunks) => chunks
            .iter()
            .filter_map(|c| c.get("text").and_then(Value::as_str))
            .collect(),
        _ => String::new(),
    }
}
