//! # Core Data Model
//!
//! Request-scoped values passed between the extraction, suggestion and analysis
//! stages. Nothing here is persisted or shared across requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use url::Url;

use crate::errors::AnalysisError;

/// Structured data and page signals extracted from a single HTML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Recognized Schema.org types in document order, without duplicates.
    pub existing_schema_types: Vec<String>,
    /// One entry per successfully parsed `application/ld+json` block.
    pub raw_jsonld: Vec<Value>,
    /// Microdata items converted to JSON-LD shaped objects.
    pub microdata: Vec<Value>,
    pub open_graph: BTreeMap<String, String>,
    /// Names of signal elements (e.g. `article`, `video`) present in the body.
    pub tags: BTreeSet<String>,
}

impl ExtractedMetadata {
    /// Returns the value of an OpenGraph property, accepting keys with or
    /// without the `og:` prefix.
    pub fn og(&self, key: &str) -> Option<&str> {
        let key = key.strip_prefix("og:").unwrap_or(key);
        self.open_graph
            .get(&format!("og:{key}"))
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_ascii_lowercase())
    }
}

/// The metadata of a page together with its visible text.
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    pub metadata: ExtractedMetadata,
    pub text: String,
}

/// Basic token statistics over a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub word_count: usize,
    pub n_tokens: usize,
    pub avg_token_length: f64,
}

/// Parses and validates a page URL supplied by a caller.
///
/// Only absolute `http` and `https` URLs are accepted.
pub fn parse_page_url(raw: &str) -> Result<Url, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::Validation(
            "Missing 'url' parameter".to_string(),
        ));
    }
    let url = Url::parse(trimmed)?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        scheme => Err(AnalysisError::Validation(format!(
            "Unsupported URL scheme '{scheme}': only http and https pages can be fetched"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_page_url_accepts_http_and_https() {
        assert!(parse_page_url("https://example.com/a").is_ok());
        assert!(parse_page_url("  http://example.com ").is_ok());
    }

    #[test]
    fn parse_page_url_rejects_bad_input() {
        for raw in ["", "   ", "not a url", "ftp://example.com/file", "mailto:a@b.c"] {
            let err = parse_page_url(raw).unwrap_err();
            assert!(matches!(err, AnalysisError::Validation(_)), "{raw}");
        }
    }

    #[test]
    fn og_lookup_accepts_both_key_forms() {
        let mut metadata = ExtractedMetadata::default();
        metadata
            .open_graph
            .insert("og:type".to_string(), "article".to_string());
        metadata
            .open_graph
            .insert("og:image".to_string(), "  ".to_string());
        assert_eq!(metadata.og("type"), Some("article"));
        assert_eq!(metadata.og("og:type"), Some("article"));
        assert_eq!(metadata.og("image"), None);
    }
}
