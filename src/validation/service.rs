// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Validation pipeline orchestration
//!
//! Composes rate limiting, URL vetting, content fetching, and provider
//! dispatch into one request lifecycle. Gates run in a fixed order and
//! each rejection carries enough context for the API layer to shape the
//! wire response.

use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::config::ValidationConfig;
use super::fetcher::ContentFetcher;
use super::huggingface::HuggingFaceProvider;
use super::openai::OpenAiProvider;
use super::provider::LlmProvider;
use super::rate_limiter::RateLimiter;
use super::types::{ProviderKind, ValidationError, ValidationReport};
use super::url::is_valid_url;

/// Configuration presence and model for one provider, as reported by /health
#[derive(Debug, Clone)]
pub struct ProviderStatus {
    /// Whether an API key is present
    pub configured: bool,
    /// Effective model identifier
    pub model: String,
}

/// Main validation service composing the pipeline stages
pub struct ValidationService {
    providers: HashMap<ProviderKind, Box<dyn LlmProvider>>,
    fetcher: ContentFetcher,
    rate_limiter: RateLimiter,
    config: ValidationConfig,
}

impl ValidationService {
    /// Create a service with the standard provider adapters
    pub fn new(config: ValidationConfig) -> Self {
        let mut providers: HashMap<ProviderKind, Box<dyn LlmProvider>> = HashMap::new();
        providers.insert(
            ProviderKind::OpenAi,
            Box::new(OpenAiProvider::new(
                config.openai.api_key.clone(),
                config.openai.model.clone(),
            )),
        );
        providers.insert(
            ProviderKind::HuggingFace,
            Box::new(HuggingFaceProvider::new(
                config.huggingface.api_key.clone(),
                config.huggingface.model.clone(),
            )),
        );

        Self::with_providers(config, providers)
    }

    /// Create a service with a custom provider table
    ///
    /// Used by tests to swap in stub adapters; the gate order and wire
    /// semantics are identical to `new`.
    pub fn with_providers(
        config: ValidationConfig,
        providers: HashMap<ProviderKind, Box<dyn LlmProvider>>,
    ) -> Self {
        let fetcher = ContentFetcher::new(
            Duration::from_secs(config.fetch_timeout_secs),
            config.max_content_chars,
        );
        let rate_limiter = RateLimiter::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        );

        Self {
            providers,
            fetcher,
            rate_limiter,
            config,
        }
    }

    /// Run the full validation pipeline for one request
    ///
    /// Gate order: rate limit, field presence, URL syntax, content fetch,
    /// provider dispatch. The rate limit check counts every request, even
    /// ones later rejected for bad input. The provider is taken as the raw
    /// wire string; absent or unrecognized values fall back to the
    /// configured default.
    pub async fn validate(
        &self,
        client_id: &str,
        url: Option<&str>,
        query: Option<&str>,
        provider: Option<&str>,
    ) -> Result<ValidationReport, ValidationError> {
        let decision = self.rate_limiter.check(client_id).await;
        if !decision.allowed {
            warn!("Rate limit exceeded for client {}", client_id);
            return Err(ValidationError::RateLimited {
                retry_after_secs: decision.retry_after_secs(),
            });
        }

        let (url, query) = match (url, query) {
            (Some(url), Some(query)) if !url.is_empty() && !query.is_empty() => (url, query),
            _ => return Err(ValidationError::MissingFields),
        };

        if !is_valid_url(url) {
            return Err(ValidationError::InvalidUrl);
        }

        let content = self.fetcher.fetch(url).await?;
        debug!("Fetched {} chars from {}", content.len(), url);

        let kind = provider
            .and_then(|p| p.parse::<ProviderKind>().ok())
            .unwrap_or(self.config.default_provider);
        let adapter = self
            .providers
            .get(&kind)
            .ok_or(ValidationError::ProviderUnavailable { provider: kind })?;

        let judgement = adapter.judge(&content, query).await?;
        info!(
            "Validation complete for {}: matches={} via {}",
            url, judgement.matches, kind
        );

        Ok(ValidationReport {
            provider: kind,
            judgement,
        })
    }

    /// Provider used when a request names none
    pub fn default_provider(&self) -> ProviderKind {
        self.config.default_provider
    }

    /// Configuration presence and model for one provider
    pub fn provider_status(&self, kind: ProviderKind) -> Option<ProviderStatus> {
        self.providers.get(&kind).map(|adapter| ProviderStatus {
            configured: adapter.is_configured(),
            model: adapter.model().to_string(),
        })
    }
}
