// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the validation pipeline

use std::env;

use super::types::ProviderKind;

/// Chat model used when OPENAI_MODEL is not set
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Instruct model used when HUGGINGFACE_MODEL is not set
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// Configuration for the validation pipeline
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Provider used when a request names none
    pub default_provider: ProviderKind,
    /// OpenAI credentials and model
    pub openai: ProviderSettings,
    /// Hugging Face credentials and model
    pub huggingface: ProviderSettings,
    /// Maximum requests per client within one window
    pub rate_limit_max_requests: u32,
    /// Rate limit window in seconds
    pub rate_limit_window_secs: u64,
    /// Outbound fetch deadline in seconds
    pub fetch_timeout_secs: u64,
    /// Maximum characters of sanitized content handed to the LLM
    pub max_content_chars: usize,
}

/// Per-provider settings
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// API key, None when not configured
    pub api_key: Option<String>,
    /// Model identifier sent with each request
    pub model: String,
}

impl ValidationConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_provider: env::var("LLM_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(ProviderKind::OpenAi),
            openai: ProviderSettings {
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            },
            huggingface: ProviderSettings {
                api_key: env::var("HUGGINGFACE_API_KEY")
                    .ok()
                    .filter(|k| !k.is_empty()),
                model: env::var("HUGGINGFACE_MODEL")
                    .unwrap_or_else(|_| DEFAULT_HUGGINGFACE_MODEL.to_string()),
            },
            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_content_chars: env::var("MAX_CONTENT_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.rate_limit_max_requests == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }
        if self.rate_limit_window_secs == 0 {
            return Err("Rate limit window must be greater than 0".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("Fetch timeout must be greater than 0".to_string());
        }
        if self.max_content_chars == 0 {
            return Err("Content limit must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Check if any provider has an API key configured
    pub fn has_any_provider(&self) -> bool {
        self.openai.api_key.is_some() || self.huggingface.api_key.is_some()
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderKind::OpenAi,
            openai: ProviderSettings {
                api_key: None,
                model: DEFAULT_OPENAI_MODEL.to_string(),
            },
            huggingface: ProviderSettings {
                api_key: None,
                model: DEFAULT_HUGGINGFACE_MODEL.to_string(),
            },
            rate_limit_max_requests: 10,
            rate_limit_window_secs: 60,
            fetch_timeout_secs: 10,
            max_content_chars: 4000,
        }
    }
}
