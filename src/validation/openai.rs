// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OpenAI chat-completions provider
//!
//! Asks a chat model for a strict-JSON relevance verdict. Unparseable
//! model output degrades to a low-confidence judgement rather than an
//! error.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::error;

use super::judgement::{parse_judgement, validation_prompt, SYSTEM_PROMPT};
use super::provider::LlmProvider;
use super::types::{MatchJudgement, ProviderKind, ValidationError};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    api_key: Option<String>,
    model: String,
    api_url: String,
    client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Arguments
    /// * `api_key` - API key, None when not configured
    /// * `model` - Chat model identifier
    pub fn new(api_key: Option<String>, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            model,
            api_url: OPENAI_API_URL.to_string(),
            client,
        }
    }

    /// Override the API endpoint (for proxies and test stubs)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn judge(
        &self,
        content: &str,
        query: &str,
    ) -> Result<MatchJudgement, ValidationError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ValidationError::NoApiKey {
                provider: ProviderKind::OpenAi,
            })?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: validation_prompt(query, content),
                },
            ],
            temperature: 0.3,
            max_tokens: 200,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ValidationError::ProviderRequest {
                provider: ProviderKind::OpenAi,
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("OpenAI request failed with status {}", status);
            return Err(ValidationError::ProviderRequest {
                provider: ProviderKind::OpenAi,
                status: status.as_u16(),
                message,
            });
        }

        let data: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| ValidationError::ProviderRequest {
                    provider: ProviderKind::OpenAi,
                    status: 0,
                    message: format!("JSON parse error: {}", e),
                })?;

        let message_content = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_else(|| "{}".to_string());

        Ok(parse_judgement(&message_content).unwrap_or_else(|| MatchJudgement {
            matches: false,
            reasoning: "Failed to parse LLM response".to_string(),
        }))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, serde::Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, serde::Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, serde::Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
