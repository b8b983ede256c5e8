//! OpenAI-compatible chat-completions client.
//!
//! Speaks the `/chat/completions` dialect shared by OpenAI, Groq and
//! compatible gateways. Single-shot only: the fallback path never streams.

use crate::llm::client::ModelClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions API.
pub struct OpenAICompatClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAICompatClient {
    pub fn new(
        http: reqwest::Client,
        api_base: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            api_base,
            api_key,
            model,
            timeout,
        }
    }
}

#[async_trait]
impl ModelClient for OpenAICompatClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
            "temperature": 0.7,
            "max_tokens": 1000,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Model(format!("Chat completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Model(format!(
                "Chat completion API returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Model(format!("Failed to parse completion: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Model("No completion in model response".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
