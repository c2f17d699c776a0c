//! # `schemascope-text`: Text Feature Extraction
//!
//! Token statistics and excerpts over the visible text of a page, or over any
//! text submitted directly to the `/extract` endpoint.

use regex::Regex;
use schemascope::TextFeatures;
use std::sync::OnceLock;
use tracing::debug;

/// The default length of the text excerpt returned next to a suggested schema.
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

const ELLIPSIS: &str = "...";

fn token_pattern() -> Option<&'static Regex> {
    static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\w+").ok()).as_ref()
}

/// Splits text into word tokens: maximal runs of Unicode word characters.
///
/// Punctuation and whitespace separate tokens and are never part of one.
pub fn tokens(text: &str) -> Vec<&str> {
    token_pattern()
        .map(|re| re.find_iter(text).map(|m| m.as_str()).collect())
        .unwrap_or_default()
}

/// Computes word and token statistics.
///
/// `word_count` counts whitespace-separated words, `n_tokens` counts word
/// tokens, and `avg_token_length` is their mean length in characters (0 when
/// there are no tokens).
pub fn compute_features(text: &str) -> TextFeatures {
    let word_count = text.split_whitespace().count();
    let tokens = tokens(text);
    let n_tokens = tokens.len();
    let total_chars: usize = tokens.iter().map(|t| t.chars().count()).sum();
    let avg_token_length = if n_tokens == 0 {
        0.0
    } else {
        total_chars as f64 / n_tokens as f64
    };
    debug!("Computed features: {word_count} words, {n_tokens} tokens");

    TextFeatures {
        word_count,
        n_tokens,
        avg_token_length,
    }
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns at most `max_chars` characters of the collapsed text, followed by
/// `...` when anything was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push_str(ELLIPSIS);
    cut
}
