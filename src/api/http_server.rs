// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server wiring
//!
//! Routes, CORS, and shared state. CORS is allow-all and answers OPTIONS
//! preflights; axum's router answers wrong-method requests with 405.

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::health::health_handler;
use super::validate::validate_handler;
use crate::validation::ValidationService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// The validation pipeline
    pub service: Arc<ValidationService>,
}

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/validate", post(validate_handler))
        .route("/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve the API
pub async fn start_server(addr: SocketAddr, service: ValidationService) -> anyhow::Result<()> {
    let state = AppState {
        service: Arc::new(service),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
