//! # Text Crate Tests
//!
//! Token statistics and excerpts, independent of the server.

use anyhow::Result;
use schemascope_text::{collapse_whitespace, compute_features, excerpt, tokens};

#[test]
fn test_compute_features_empty_input() {
    let features = compute_features("   \n\t ");
    assert_eq!(features.word_count, 0);
    assert_eq!(features.n_tokens, 0);
    assert_eq!(features.avg_token_length, 0.0);
}

#[test]
fn test_compute_features_counts_tokens_and_words() {
    // Words are whitespace separated; the comma and the dash are not tokens.
    let features = compute_features("Hello, brave new-world");
    assert_eq!(features.word_count, 3);
    assert_eq!(tokens("Hello, brave new-world"), vec!["Hello", "brave", "new", "world"]);
    assert_eq!(features.n_tokens, 4);
    assert_eq!(features.avg_token_length, 4.5);
}

#[test]
fn test_average_is_total_length_over_token_count() {
    let text = "Structured data helps search engines understand páginas";
    let toks = tokens(text);
    let features = compute_features(text);
    let total: usize = toks.iter().map(|t| t.chars().count()).sum();
    assert_eq!(features.n_tokens, toks.len());
    assert!((features.avg_token_length - total as f64 / toks.len() as f64).abs() < f64::EPSILON);
}

#[test]
fn test_excerpt_truncates_on_characters() {
    assert_eq!(excerpt("  short   text ", 500), "short text");
    assert_eq!(excerpt("abcdef", 3), "abc...");
    // Multi-byte characters are counted, never split.
    assert_eq!(excerpt("ééééé", 2), "éé...");
    assert_eq!(collapse_whitespace("a\n\n  b\tc"), "a b c");
}

#[test]
fn test_features_serialize_with_wire_names() -> Result<()> {
    let value = serde_json::to_value(compute_features("one two"))?;
    assert_eq!(value["word_count"], 2);
    assert_eq!(value["n_tokens"], 2);
    assert_eq!(value["avg_token_length"], 3.0);
    Ok(())
}
