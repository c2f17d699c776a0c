//! # Schemascope
//!
//! Core of the structured-data service: the page data model, the error
//! taxonomy, the `PageFetcher` contract, the schema suggestion builder, and the
//! analysis that ranks structured-data issues by severity.
//!
//! Fetching, HTML parsing and sitemap reading live in the plugin crates of the
//! workspace; this crate only depends on their output.

pub mod analysis;
pub mod cluster;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod fetch;
pub mod graph;
pub mod page_type;
pub mod prioritize;
pub mod requirements;
pub mod rules;
pub mod suggest;
pub mod types;
pub mod validate;

pub use analysis::{analyze_page, Analysis};
pub use cluster::{cluster_by_level, Clusters};
pub use errors::AnalysisError;
pub use fetch::PageFetcher;
pub use prioritize::{prioritize, Action, ActionKind, Severity};
pub use rules::{default_type_rules, TypeRuleConfig, TypeRules};
pub use suggest::{build_schema_draft, SchemaDraft, SchemaSuggestion, TextExtract};
pub use types::{parse_page_url, ExtractedMetadata, ExtractedPage, TextFeatures};
pub use validate::EntityValidation;
