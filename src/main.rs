// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use source_validator_node::api::start_server;
use source_validator_node::validation::{ValidationConfig, ValidationService};
use std::env;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Source Validator node...\n");

    let config = ValidationConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    if !config.has_any_provider() {
        tracing::warn!("No LLM provider API key configured; /validate will return 500");
    }
    tracing::info!("Default LLM provider: {}", config.default_provider);

    let host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("API_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let service = ValidationService::new(config);
    start_server(addr, service).await?;

    Ok(())
}
