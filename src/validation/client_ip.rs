// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Best-effort client identity for rate limiting

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Derive a client identifier from proxy headers or the socket address
///
/// Priority: first `x-forwarded-for` entry, then `x-real-ip`, then the
/// transport remote address, then `"unknown"`. Never fails.
pub fn client_identifier(headers: &HeaderMap, remote_addr: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    match remote_addr {
        Some(addr) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}
