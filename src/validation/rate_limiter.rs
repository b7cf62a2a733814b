// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-client rate limiting with a rolling window
//!
//! Quota windows are anchored to the first request per key, not a sliding
//! average. The whole check runs under the write guard so concurrent
//! requests for one key cannot exceed the configured maximum.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Request counter for one client identifier
#[derive(Debug, Clone, Copy)]
struct RateLimitRecord {
    count: u32,
    reset_at: Instant,
}

/// Verdict for a single rate limit check
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// When the client's window resets
    pub reset_at: Instant,
}

impl RateLimitDecision {
    /// Seconds until the window resets, rounded up
    pub fn retry_after_secs(&self) -> u64 {
        let left = self.reset_at.saturating_duration_since(Instant::now());
        left.as_secs() + u64::from(left.subsec_nanos() > 0)
    }
}

/// Keyed rate limiter over an in-memory table
pub struct RateLimiter {
    records: RwLock<HashMap<String, RateLimitRecord>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `max_requests` - Maximum requests allowed per window
    /// * `window` - Window length; the reset time is fixed when a key's
    ///   record is created and is not extended by later requests
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Check and count a request for the given client identifier
    ///
    /// An expired record is replaced, not merged. A denied request does not
    /// modify the stored record.
    pub async fn check(&self, identifier: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut records = self.records.write().await;

        let mut record = match records.get(identifier) {
            Some(existing) if now <= existing.reset_at => *existing,
            _ => RateLimitRecord {
                count: 0,
                reset_at: now + self.window,
            },
        };

        if record.count >= self.max_requests {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_at: record.reset_at,
            };
        }

        record.count += 1;
        let decision = RateLimitDecision {
            allowed: true,
            remaining: self.max_requests - record.count,
            reset_at: record.reset_at,
        };
        records.insert(identifier.to_string(), record);

        decision
    }

    /// Get the configured maximum requests per window
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }
}
