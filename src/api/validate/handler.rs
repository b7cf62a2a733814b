// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Validate API endpoint handler

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use std::net::SocketAddr;
use tracing::{debug, error, warn};

use super::request::ValidateApiRequest;
use super::response::ValidateApiResponse;
use crate::api::http_server::AppState;
use crate::validation::{client_identifier, ValidationError};

/// POST /validate - Judge a URL's content against a query
///
/// # Request
/// - `url`: Absolute http/https URL (required)
/// - `query`: Natural-language query (required)
/// - `provider`: `"openai"` or `"huggingface"`; absent or unrecognized
///   values use the configured default
///
/// # Status codes
/// - 200: judgement produced, or link unreachable (`success=false`)
/// - 400: missing fields or invalid URL
/// - 429: rate limited, body carries `retryAfter`
/// - 500: provider not configured or provider call failed
pub async fn validate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(request): Json<ValidateApiRequest>,
) -> (StatusCode, Json<ValidateApiResponse>) {
    let client_id = client_identifier(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    debug!("Validation request from {}: {:?}", client_id, request.url);

    let result = state
        .service
        .validate(
            &client_id,
            request.url.as_deref(),
            request.query.as_deref(),
            request.provider.as_deref(),
        )
        .await;

    match result {
        Ok(report) => (StatusCode::OK, Json(ValidateApiResponse::judged(&report))),
        Err(failure) => {
            match &failure {
                ValidationError::NoApiKey { .. }
                | ValidationError::ProviderRequest { .. }
                | ValidationError::ProviderUnavailable { .. } => {
                    error!("Validation failed for {}: {}", client_id, failure);
                }
                _ => warn!("Validation rejected for {}: {}", client_id, failure),
            }
            let (status, response) = match &failure {
                ValidationError::RateLimited { retry_after_secs } => (
                    StatusCode::TOO_MANY_REQUESTS,
                    ValidateApiResponse::rate_limited(*retry_after_secs),
                ),
                ValidationError::MissingFields => (
                    StatusCode::BAD_REQUEST,
                    ValidateApiResponse::missing_fields(),
                ),
                ValidationError::InvalidUrl => {
                    (StatusCode::BAD_REQUEST, ValidateApiResponse::invalid_url())
                }
                ValidationError::Fetch(fetch_error) => (
                    StatusCode::OK,
                    ValidateApiResponse::fetch_failed(fetch_error),
                ),
                ValidationError::NoApiKey { provider }
                | ValidationError::ProviderRequest { provider, .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ValidateApiResponse::provider_failed(*provider, failure.to_string()),
                ),
                ValidationError::ProviderUnavailable { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ValidateApiResponse::internal(failure.to_string()),
                ),
            };
            (status, Json(response))
        }
    }
}
