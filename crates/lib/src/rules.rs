//! # Type Inference Rules
//!
//! When a page carries no usable structured data, the schema type to propose is
//! inferred from page signals by walking an ordered rule table. The first rule
//! whose signal matches wins. The table is data: a default is built in and a
//! replacement can be loaded from configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::DEFAULT_SCHEMA_TYPE;
use crate::types::ExtractedMetadata;

/// A page signal a rule can test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// `og:type` starts with the given value (case-insensitive).
    OgType(String),
    /// The lowercased URL path matches the given regular expression.
    UrlPattern(String),
    /// An element with the given tag name is present in the document.
    Tag(String),
    /// The URL points at the site root.
    Homepage,
}

/// One row of the rule table, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRuleConfig {
    #[serde(flatten)]
    pub signal: Signal,
    pub schema_type: String,
}

#[derive(Debug, Clone)]
enum CompiledSignal {
    OgType(String),
    UrlPattern(Regex),
    Tag(String),
    Homepage,
}

#[derive(Debug, Clone)]
struct TypeRule {
    signal: CompiledSignal,
    schema_type: String,
}

/// The compiled, ordered rule table.
#[derive(Debug, Clone)]
pub struct TypeRules {
    rules: Vec<TypeRule>,
}

impl TypeRules {
    /// Compiles a rule table. Fails on the first invalid URL pattern.
    pub fn new(rules: &[TypeRuleConfig]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|rule| {
                let signal = match &rule.signal {
                    Signal::OgType(prefix) => CompiledSignal::OgType(prefix.to_ascii_lowercase()),
                    Signal::UrlPattern(pattern) => CompiledSignal::UrlPattern(Regex::new(pattern)?),
                    Signal::Tag(tag) => CompiledSignal::Tag(tag.to_ascii_lowercase()),
                    Signal::Homepage => CompiledSignal::Homepage,
                };
                Ok(TypeRule {
                    signal,
                    schema_type: rule.schema_type.clone(),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the type of the first matching rule, if any.
    pub fn infer(&self, metadata: &ExtractedMetadata) -> Option<&str> {
        let url = Url::parse(&metadata.url).ok();
        let path = url
            .as_ref()
            .map(|u| u.path().to_lowercase())
            .unwrap_or_default();
        let og_type = metadata.og("type").map(str::to_ascii_lowercase);

        self.rules
            .iter()
            .find(|rule| match &rule.signal {
                CompiledSignal::OgType(prefix) => og_type
                    .as_deref()
                    .is_some_and(|og| og.starts_with(prefix.as_str())),
                CompiledSignal::UrlPattern(re) => url.is_some() && re.is_match(&path),
                CompiledSignal::Tag(tag) => metadata.has_tag(tag),
                CompiledSignal::Homepage => url.is_some() && is_homepage_path(&path),
            })
            .map(|rule| rule.schema_type.as_str())
    }

    /// Like [`TypeRules::infer`], falling back to `WebPage`.
    pub fn infer_or_default(&self, metadata: &ExtractedMetadata) -> String {
        self.infer(metadata)
            .unwrap_or(DEFAULT_SCHEMA_TYPE)
            .to_string()
    }
}

impl Default for TypeRules {
    fn default() -> Self {
        // The built-in patterns are literals; `default_table_compiles_every_rule` guards them.
        Self::new(&default_type_rules()).unwrap_or(Self { rules: Vec::new() })
    }
}

fn is_homepage_path(path: &str) -> bool {
    matches!(path, "" | "/" | "/index.html" | "/index.htm")
}

/// The built-in rule table.
///
/// OpenGraph types come first because they state the author's intent, then URL
/// conventions, then structural hints from the markup, then the site root.
pub fn default_type_rules() -> Vec<TypeRuleConfig> {
    let og = |prefix: &str, ty: &str| TypeRuleConfig {
        signal: Signal::OgType(prefix.to_string()),
        schema_type: ty.to_string(),
    };
    let path = |pattern: &str, ty: &str| TypeRuleConfig {
        signal: Signal::UrlPattern(pattern.to_string()),
        schema_type: ty.to_string(),
    };
    let tag = |name: &str, ty: &str| TypeRuleConfig {
        signal: Signal::Tag(name.to_string()),
        schema_type: ty.to_string(),
    };

    vec![
        og("product", "Product"),
        og("article", "Article"),
        og("video", "VideoObject"),
        og("book", "Book"),
        og("profile", "Person"),
        og("music.song", "MusicRecording"),
        og("music.album", "MusicAlbum"),
        path(r"/(product|products|p|item|shop)/[^/]+", "Product"),
        path(r"/(recipe|recipes)/[^/]+", "Recipe"),
        path(r"/(how-to|guide|guides|tutorial|tutorials)/[^/]+", "HowTo"),
        path(r"/(blog|article|articles|post|posts|news)/[^/]+", "Article"),
        path(r"/(faq|faqs)(/|$)", "FAQPage"),
        path(r"/(event|events|webinar|conference)/[^/]+", "Event"),
        path(r"/(job|jobs|career|careers|position)/[^/]+", "JobPosting"),
        path(r"/(course|courses|class|training)/[^/]+", "Course"),
        path(r"/(video|videos|watch)/[^/]+", "VideoObject"),
        path(r"/(podcast|episode)/[^/]+", "PodcastEpisode"),
        path(r"/(about|about-us|who-we-are|our-story)(/|$)", "AboutPage"),
        path(r"/(contact|contact-us|get-in-touch)(/|$)", "ContactPage"),
        tag("article", "Article"),
        tag("video", "VideoObject"),
        TypeRuleConfig {
            signal: Signal::Homepage,
            schema_type: "WebSite".to_string(),
        },
    ]
}
