// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end tests for POST /validate
//!
//! Content comes from a local stub server; LLM judgements come from stub
//! adapters injected through the service's provider table. Only the
//! pipeline's own HTTP surface is exercised over the network.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use source_validator_node::api::{create_app, AppState};
use source_validator_node::validation::{
    LlmProvider, MatchJudgement, ProviderKind, ValidationConfig, ValidationError,
    ValidationService,
};

/// Provider stub with a fixed verdict
struct StubProvider {
    kind: ProviderKind,
    matches: bool,
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn judge(
        &self,
        _content: &str,
        _query: &str,
    ) -> Result<MatchJudgement, ValidationError> {
        Ok(MatchJudgement {
            matches: self.matches,
            reasoning: "Stubbed reasoning.".to_string(),
        })
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}

fn app_with_service(service: ValidationService) -> Router {
    create_app(AppState {
        service: Arc::new(service),
    })
}

/// App whose provider table holds stubs for both providers
fn app_with_stubs(matches: bool) -> Router {
    let mut providers: HashMap<ProviderKind, Box<dyn LlmProvider>> = HashMap::new();
    providers.insert(
        ProviderKind::OpenAi,
        Box::new(StubProvider {
            kind: ProviderKind::OpenAi,
            matches,
        }),
    );
    providers.insert(
        ProviderKind::HuggingFace,
        Box::new(StubProvider {
            kind: ProviderKind::HuggingFace,
            matches,
        }),
    );

    app_with_service(ValidationService::with_providers(
        ValidationConfig::default(),
        providers,
    ))
}

/// Serve fixed content on an ephemeral local port, returning the base URL
async fn spawn_content_server() -> String {
    let app = Router::new()
        .route(
            "/page",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    "<html><head><title>Example Domain</title><script>track()</script></head>\
                     <body><p>This domain is for use in illustrative examples.</p></body></html>",
                )
            }),
        )
        .route(
            "/data",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "application/json")],
                    r#"{"key": "value"}"#,
                )
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn post_validate(app: Router, body: Value) -> (StatusCode, Value) {
    post_validate_from(app, body, None).await
}

async fn post_validate_from(
    app: Router,
    body: Value,
    forwarded_for: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/validate")
        .header("content-type", "application/json");
    if let Some(ip) = forwarded_for {
        builder = builder.header("x-forwarded-for", ip);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_missing_url_returns_400() {
    let app = app_with_stubs(true);

    let (status, body) = post_validate(app, json!({"query": "anything"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Missing required fields"));
    assert_eq!(body["isValidLink"], json!(false));
}

#[tokio::test]
async fn test_missing_query_returns_400() {
    let app = app_with_stubs(true);

    let (status, body) = post_validate(app, json!({"url": "https://example.com"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing required fields"));
}

#[tokio::test]
async fn test_invalid_url_returns_400() {
    let app = app_with_stubs(true);

    let (status, body) = post_validate(
        app,
        json!({"url": "ftp://example.com", "query": "anything"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid URL format"));
}

#[tokio::test]
async fn test_get_method_rejected() {
    let app = app_with_stubs(true);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/validate")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_options_preflight_succeeds() {
    let app = app_with_stubs(true);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/validate")
        .header("origin", "https://app.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_matching_content_end_to_end() {
    let base = spawn_content_server().await;
    let app = app_with_stubs(true);

    let (status, body) = post_validate(
        app,
        json!({"url": format!("{}/page", base), "query": "example domain"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["isValidLink"], json!(true));
    assert_eq!(body["contentMatchesQuery"], json!(true));
    assert_eq!(body["provider"], json!("openai"));
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Link is valid and content matches query!"));
}

#[tokio::test]
async fn test_non_matching_content_still_succeeds() {
    let base = spawn_content_server().await;
    let app = app_with_stubs(false);

    let (status, body) = post_validate(
        app,
        json!({"url": format!("{}/page", base), "query": "quantum physics"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["isValidLink"], json!(true));
    assert_eq!(body["contentMatchesQuery"], json!(false));
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Link is valid, but content does not match query."));
}

#[tokio::test]
async fn test_explicit_provider_selection() {
    let base = spawn_content_server().await;
    let app = app_with_stubs(true);

    let (status, body) = post_validate(
        app,
        json!({
            "url": format!("{}/page", base),
            "query": "example domain",
            "provider": "huggingface"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], json!("huggingface"));
}

#[tokio::test]
async fn test_unrecognized_provider_falls_back_to_default() {
    let base = spawn_content_server().await;
    let app = app_with_stubs(true);

    let (status, body) = post_validate(
        app,
        json!({
            "url": format!("{}/page", base),
            "query": "example domain",
            "provider": "anthropic"
        }),
    )
    .await;

    // Unknown provider names are not a deserialization error; the
    // configured default handles the request
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["provider"], json!("openai"));
}

#[tokio::test]
async fn test_unsupported_content_type_is_invalid_link() {
    let base = spawn_content_server().await;
    let app = app_with_stubs(true);

    let (status, body) = post_validate(
        app,
        json!({"url": format!("{}/data", base), "query": "anything"}),
    )
    .await;

    // The service worked; the link just is not usable
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["isValidLink"], json!(false));
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unsupported content type"));
}

#[tokio::test]
async fn test_http_error_status_is_invalid_link() {
    let base = spawn_content_server().await;
    let app = app_with_stubs(true);

    let (status, body) = post_validate(
        app,
        json!({"url": format!("{}/missing", base), "query": "anything"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["isValidLink"], json!(false));
    assert_eq!(body["error"], json!("HTTP 404: Not Found"));
}

#[tokio::test]
async fn test_unreachable_host_is_invalid_link() {
    // Bind then drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = app_with_stubs(true);
    let (status, body) = post_validate(
        app,
        json!({"url": format!("http://{}/", addr), "query": "anything"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["isValidLink"], json!(false));
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unconfigured_provider_returns_500() {
    let base = spawn_content_server().await;
    // Real adapters, no API keys
    let app = app_with_service(ValidationService::new(ValidationConfig::default()));

    let (status, body) = post_validate(
        app,
        json!({"url": format!("{}/page", base), "query": "anything"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    // The link itself was reachable; only the judgement failed
    assert_eq!(body["isValidLink"], json!(true));
    assert_eq!(body["message"], json!("LLM validation failed"));
    assert_eq!(body["error"], json!("OPENAI_API_KEY not configured"));
    assert_eq!(body["provider"], json!("openai"));
}

#[tokio::test]
async fn test_rate_limit_kicks_in_on_eleventh_request() {
    let app = app_with_stubs(true);

    // Default quota is 10 per window; bad-input requests still count
    for _ in 0..10 {
        let (status, _) =
            post_validate_from(app.clone(), json!({}), Some("203.0.113.50")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, body) = post_validate_from(app, json!({}), Some("203.0.113.50")).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Too many requests"));
    assert!(body["retryAfter"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_rate_limit_keys_clients_separately() {
    let app = app_with_stubs(true);

    for _ in 0..10 {
        let (status, _) =
            post_validate_from(app.clone(), json!({}), Some("198.51.100.1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // A different client is still served
    let (status, _) = post_validate_from(app, json!({}), Some("198.51.100.2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
