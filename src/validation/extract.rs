//! Markup stripping for fetched pages
//!
//! Reduces HTML to plain text suitable for an LLM context window.

use regex::Regex;
use std::sync::OnceLock;

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap())
}

fn style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap())
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

/// Strip markup from an HTML document, returning cleaned plain text
///
/// Removes `<script>` and `<style>` blocks wholesale (non-greedy,
/// case-insensitive), replaces remaining tags with spaces, collapses
/// whitespace runs to single spaces, and trims.
pub fn strip_markup(html: &str) -> String {
    let without_scripts = script_re().replace_all(html, "");
    let without_styles = style_re().replace_all(&without_scripts, "");
    let without_tags = tag_re().replace_all(&without_styles, " ");

    without_tags
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate text to at most `max_chars` characters
///
/// Counts characters, not bytes, so multi-byte text never splits mid-char.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}
