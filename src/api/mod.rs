// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod health;
pub mod http_server;
pub mod validate;

pub use health::{health_handler, HealthResponse, ProviderHealth};
pub use http_server::{create_app, start_server, AppState};
pub use validate::{validate_handler, ValidateApiRequest, ValidateApiResponse};
