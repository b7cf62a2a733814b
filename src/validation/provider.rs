// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! LLM provider trait definition

use async_trait::async_trait;

use super::types::{MatchJudgement, ProviderKind, ValidationError};

/// Trait for implementing LLM provider adapters
///
/// An adapter turns (content, query) into a match judgement via its
/// provider's HTTP protocol. Missing credentials are a hard failure raised
/// at call time, distinct from provider HTTP errors.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Judge whether the content matches the query
    ///
    /// # Arguments
    /// * `content` - Sanitized page text, bounded by the fetcher
    /// * `query` - The caller's natural-language query
    ///
    /// # Returns
    /// A judgement, or an error when credentials are absent or the
    /// provider call fails. Unparseable provider output is recovered into
    /// a low-confidence judgement, never an error.
    async fn judge(&self, content: &str, query: &str)
        -> Result<MatchJudgement, ValidationError>;

    /// Which provider this adapter speaks to
    fn kind(&self) -> ProviderKind;

    /// Check if the adapter has an API key
    fn is_configured(&self) -> bool;

    /// Model identifier sent with each request
    fn model(&self) -> &str;
}
