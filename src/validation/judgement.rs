// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Parsing LLM output into match judgements
//!
//! Providers are asked for strict JSON but do not always comply. Parsing is
//! staged: strict parse, then JSON-object extraction from surrounding prose,
//! then a keyword heuristic. Each stage is a pure function returning either
//! a judgement or an explicit miss; adapters compose the stages they need.

use serde::Deserialize;

use super::extract::truncate_chars;
use super::types::MatchJudgement;

/// System instruction sent to chat-style providers
pub const SYSTEM_PROMPT: &str =
    "You are a helpful content validation assistant. Always respond with valid JSON.";

/// Build the user prompt embedding the query and the fetched content
pub fn validation_prompt(query: &str, content: &str) -> String {
    format!(
        "You are a content validation assistant. Analyze if the following content is relevant to and matches the given query.\n\n\
         Query: \"{}\"\n\n\
         Content: \"{}\"\n\n\
         Respond in JSON format only:\n\
         {{\n  \"matches\": true/false,\n  \"reasoning\": \"Brief explanation of why the content does or doesn't match the query\"\n}}",
        query, content
    )
}

#[derive(Debug, Deserialize)]
struct RawJudgement {
    #[serde(default)]
    matches: bool,
    reasoning: Option<String>,
}

/// Parse text that should be exactly one JSON judgement object
pub fn parse_judgement(text: &str) -> Option<MatchJudgement> {
    let raw: RawJudgement = serde_json::from_str(text).ok()?;
    Some(MatchJudgement {
        matches: raw.matches,
        reasoning: raw
            .reasoning
            .unwrap_or_else(|| "No reasoning provided".to_string()),
    })
}

/// Locate and parse a judgement object embedded in free-form text
///
/// Takes the widest `{...}` span, requires it to mention the `matches` key,
/// and hands it to the strict parser. Returns None when no such object is
/// found or it does not parse.
pub fn extract_judgement(text: &str) -> Option<MatchJudgement> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }

    let candidate = &text[start..=end];
    if !candidate.contains("\"matches\"") {
        return None;
    }
    parse_judgement(candidate)
}

/// Last-resort verdict from keyword presence
///
/// Reasoning is the first 200 characters of the generated text.
pub fn keyword_judgement(text: &str) -> MatchJudgement {
    let lowered = text.to_lowercase();
    let matches = lowered.contains("true")
        || lowered.contains("matches")
        || lowered.contains("relevant");

    MatchJudgement {
        matches,
        reasoning: truncate_chars(text, 200),
    }
}
