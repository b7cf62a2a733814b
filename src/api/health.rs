// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Health check endpoint
//!
//! Reports which providers have credentials and which models are active.
//! Never fails; configuration problems show up as `configured: false`.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::http_server::AppState;
use crate::validation::{ProviderKind, ValidationService};

/// Response body for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always true when the service is up
    pub ok: bool,
    /// Active default provider
    pub provider: String,
    /// OpenAI configuration presence and model
    pub openai: ProviderHealth,
    /// Hugging Face configuration presence and model
    pub huggingface: ProviderHealth,
}

/// Configuration summary for one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHealth {
    /// Whether an API key is present
    pub configured: bool,
    /// Effective model identifier
    pub model: String,
}

fn provider_health(service: &ValidationService, kind: ProviderKind) -> ProviderHealth {
    match service.provider_status(kind) {
        Some(status) => ProviderHealth {
            configured: status.configured,
            model: status.model,
        },
        None => ProviderHealth {
            configured: false,
            model: String::new(),
        },
    }
}

/// GET /health - Report provider configuration
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = &state.service;

    Json(HealthResponse {
        ok: true,
        provider: service.default_provider().as_str().to_string(),
        openai: provider_health(service, ProviderKind::OpenAi),
        huggingface: provider_health(service, ProviderKind::HuggingFace),
    })
}
