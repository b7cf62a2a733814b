// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Validate API response types
//!
//! One wire shape covers every outcome; constructors encode the fixed
//! message templates for each terminal state of the pipeline.

use serde::{Deserialize, Serialize};

use crate::validation::{FetchError, ProviderKind, ValidationReport};

/// Response body for POST /validate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateApiResponse {
    /// Whether the validation pipeline ran to completion
    pub success: bool,
    /// Human-readable outcome summary
    pub message: String,
    /// Whether the URL was reachable with usable content
    pub is_valid_link: bool,
    /// Whether the content matched the query
    pub content_matches_query: bool,
    /// Failure detail, absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Provider consulted, when one was selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Seconds until the rate limit window resets, on 429 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ValidateApiResponse {
    /// Successful validation with a judgement from the provider
    pub fn judged(report: &ValidationReport) -> Self {
        let judgement = &report.judgement;
        let message = if judgement.matches {
            format!(
                "Link is valid and content matches query! {}",
                judgement.reasoning
            )
        } else {
            format!(
                "Link is valid, but content does not match query. {}",
                judgement.reasoning
            )
        };

        Self {
            success: true,
            message,
            is_valid_link: true,
            content_matches_query: judgement.matches,
            error: None,
            provider: Some(report.provider.as_str().to_string()),
            retry_after: None,
        }
    }

    /// Client exceeded its request quota
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self {
            success: false,
            message: "Rate limit exceeded. Please try again later.".to_string(),
            is_valid_link: false,
            content_matches_query: false,
            error: Some("Too many requests".to_string()),
            provider: None,
            retry_after: Some(retry_after_secs),
        }
    }

    /// Request body lacked url or query
    pub fn missing_fields() -> Self {
        Self {
            success: false,
            message: "URL and query are required".to_string(),
            is_valid_link: false,
            content_matches_query: false,
            error: Some("Missing required fields".to_string()),
            provider: None,
            retry_after: None,
        }
    }

    /// The url field is not an absolute http/https URL
    pub fn invalid_url() -> Self {
        Self {
            success: false,
            message: "Invalid URL format".to_string(),
            is_valid_link: false,
            content_matches_query: false,
            error: Some("Invalid URL format".to_string()),
            provider: None,
            retry_after: None,
        }
    }

    /// The link could not be fetched; the service itself worked
    pub fn fetch_failed(error: &FetchError) -> Self {
        let detail = error.to_string();
        Self {
            success: false,
            message: detail.clone(),
            is_valid_link: false,
            content_matches_query: false,
            error: Some(detail),
            provider: None,
            retry_after: None,
        }
    }

    /// The link was reachable but the provider call failed
    pub fn provider_failed(provider: ProviderKind, detail: String) -> Self {
        Self {
            success: false,
            message: "LLM validation failed".to_string(),
            is_valid_link: true,
            content_matches_query: false,
            error: Some(detail),
            provider: Some(provider.as_str().to_string()),
            retry_after: None,
        }
    }

    /// Catch-all for internal faults with no more specific mapping
    pub fn internal(detail: String) -> Self {
        Self {
            success: false,
            message: "An unexpected error occurred during validation".to_string(),
            is_valid_link: false,
            content_matches_query: false,
            error: Some(detail),
            provider: None,
            retry_after: None,
        }
    }
}
