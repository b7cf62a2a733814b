// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Validate API request types

use serde::{Deserialize, Serialize};

/// Request body for POST /validate
///
/// Every field is loosely typed at the wire level so that bad input reaches
/// the pipeline and comes back on the JSON response contract instead of as
/// a deserializer rejection: `url` and `query` are optional, and `provider`
/// is a plain string parsed inside the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateApiRequest {
    /// URL to fetch and judge (required)
    pub url: Option<String>,

    /// Natural-language query the content is judged against (required)
    pub query: Option<String>,

    /// Provider override; the configured default is used when absent or
    /// unrecognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}
