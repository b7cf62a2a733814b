// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for URL content validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::fetcher::FetchError;

/// LLM backend used to judge fetched content against a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    HuggingFace,
}

impl ProviderKind {
    /// Wire name, as accepted in requests and reported in responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::HuggingFace => "huggingface",
        }
    }

    /// Human-readable provider name for error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::HuggingFace => "Hugging Face",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Self::OpenAi),
            "huggingface" => Ok(Self::HuggingFace),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

/// Relevance verdict returned by a provider adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchJudgement {
    /// Whether the content matches the query
    pub matches: bool,
    /// Human-readable explanation of the verdict
    pub reasoning: String,
}

/// Outcome of a successful end-to-end validation
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Provider that produced the judgement
    pub provider: ProviderKind,
    /// The judgement itself
    pub judgement: MatchJudgement,
}

/// Errors that can occur during the validation pipeline
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Request is missing the url or query field
    #[error("Missing required fields")]
    MissingFields,

    /// The url field is not an absolute http/https URL
    #[error("Invalid URL format")]
    InvalidUrl,

    /// Client exceeded the per-window request quota
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until the client's window resets
        retry_after_secs: u64,
    },

    /// The target URL could not be fetched or its content is unusable
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// No API key configured for the selected provider
    #[error("{} not configured", .provider.api_key_var())]
    NoApiKey {
        /// Provider missing its key
        provider: ProviderKind,
    },

    /// The provider's HTTP call failed
    #[error("{} API error: {}", .provider.display_name(), .message)]
    ProviderRequest {
        /// Provider whose call failed
        provider: ProviderKind,
        /// HTTP status code, 0 for transport or decode failures
        status: u16,
        /// Error body or transport message
        message: String,
    },

    /// Selected provider has no registered adapter
    #[error("Provider unavailable: {provider}")]
    ProviderUnavailable {
        /// The unregistered provider
        provider: ProviderKind,
    },
}
