// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hugging Face inference API provider
//!
//! Posts the validation prompt to a model-specific inference endpoint.
//! The API returns either an array of generations or a single object;
//! both shapes are decoded explicitly. Instruct models rarely emit clean
//! JSON, so judgement parsing falls back from object extraction to a
//! keyword heuristic.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::error;

use super::judgement::{extract_judgement, keyword_judgement, validation_prompt};
use super::provider::LlmProvider;
use super::types::{MatchJudgement, ProviderKind, ValidationError};

const HUGGINGFACE_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Hugging Face inference API provider
pub struct HuggingFaceProvider {
    api_key: Option<String>,
    model: String,
    api_base: String,
    client: Client,
}

impl HuggingFaceProvider {
    /// Create a new Hugging Face provider
    ///
    /// # Arguments
    /// * `api_key` - API key, None when not configured
    /// * `model` - Model identifier, appended to the inference endpoint
    pub fn new(api_key: Option<String>, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            model,
            api_base: HUGGINGFACE_API_BASE.to_string(),
            client,
        }
    }

    /// Override the API base URL (for proxies and test stubs)
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }
}

#[async_trait]
impl LlmProvider for HuggingFaceProvider {
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
                provider: ProviderKind::HuggingFace,
            })?;

        let prompt = validation_prompt(query, content);
        let request = InferenceRequest {
            inputs: &prompt,
            parameters: InferenceParameters {
                max_new_tokens: 200,
                temperature: 0.3,
                return_full_text: false,
            },
        };

        let url = format!("{}/{}", self.api_base, self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ValidationError::ProviderRequest {
                provider: ProviderKind::HuggingFace,
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Hugging Face request failed with status {}", status);
            return Err(ValidationError::ProviderRequest {
                provider: ProviderKind::HuggingFace,
                status: status.as_u16(),
                message,
            });
        }

        let data: InferenceResponse =
            response
                .json()
                .await
                .map_err(|e| ValidationError::ProviderRequest {
                    provider: ProviderKind::HuggingFace,
                    status: 0,
                    message: format!("JSON parse error: {}", e),
                })?;

        let generated = data.into_generated_text();
        Ok(extract_judgement(&generated).unwrap_or_else(|| keyword_judgement(&generated)))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, serde::Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, serde::Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

/// The inference API answers with an array for most text-generation models
/// and a bare object for some others; both shapes are accepted.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

#[derive(Debug, serde::Deserialize)]
struct Generation {
    generated_text: Option<String>,
}

impl InferenceResponse {
    fn into_generated_text(self) -> String {
        let text = match self {
            Self::Batch(generations) => generations
                .into_iter()
                .next()
                .and_then(|g| g.generated_text),
            Self::Single(generation) => generation.generated_text,
        };
        text.unwrap_or_else(|| "{}".to_string())
    }
}
