//! Bounded URL content retrieval
//!
//! Fetches a page with a hard deadline, enforces textual content types,
//! and sanitizes the body down to a bounded plain-text excerpt.

use reqwest::{header, Client};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::extract::{strip_markup, truncate_chars};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; SourceValidator/1.0)";

/// Content fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The fetch exceeded its deadline
    #[error("Request timeout - URL took too long to respond")]
    Timeout,

    /// The server answered with a non-success status
    #[error("HTTP {status}: {status_text}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        status_text: String,
    },

    /// The response is not HTML or plain text
    #[error("Unsupported content type. Only HTML and plain text are supported.")]
    UnsupportedContentType,

    /// Any other transport-level failure
    #[error("{0}")]
    Transport(String),
}

/// Fetches URL content with a deadline and a content-size bound
pub struct ContentFetcher {
    client: Client,
    max_content_chars: usize,
}

impl ContentFetcher {
    /// Create a new content fetcher
    ///
    /// # Arguments
    /// * `timeout` - Deadline covering the whole request, connect to body
    /// * `max_content_chars` - Hard bound on returned content length
    pub fn new(timeout: Duration, max_content_chars: usize) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_content_chars,
        }
    }

    /// Fetch a URL and return its sanitized textual content
    ///
    /// The returned text is markup-free, whitespace-collapsed, and at most
    /// `max_content_chars` characters long.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching content from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !content_type.contains("text/html") && !content_type.contains("text/plain") {
            return Err(FetchError::UnsupportedContentType);
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let text = strip_markup(&body);
        Ok(truncate_chars(&text, self.max_content_chars))
    }

    /// Get the configured content bound
    pub fn max_content_chars(&self) -> usize {
        self.max_content_chars
    }
}
