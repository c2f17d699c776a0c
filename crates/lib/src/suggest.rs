//! # Schema Suggestion Builder
//!
//! Proposes a Schema.org JSON-LD object for a page. Existing markup wins: when
//! the page already declares recognized types, the first one is reused.
//! Otherwise the type is inferred from page signals through [`TypeRules`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{ARTICLE_TYPES, SCHEMA_CONTEXT};
use crate::entities::normalize_type;
use crate::rules::TypeRules;
use crate::types::{ExtractedMetadata, TextFeatures};

/// A proposed JSON-LD object. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDraft {
    used_type: String,
    from_existing_schema: Vec<String>,
    fields: Map<String, Value>,
}

impl SchemaDraft {
    pub fn used_type(&self) -> &str {
        &self.used_type
    }

    /// Recognized types already declared by the page, in document order.
    pub fn from_existing_schema(&self) -> &[String] {
        &self.from_existing_schema
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_json_ld(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Builds the draft for a page.
pub fn build_schema_draft(metadata: &ExtractedMetadata, rules: &TypeRules) -> SchemaDraft {
    let mut from_existing_schema: Vec<String> = Vec::new();
    for t in metadata.existing_schema_types.iter().filter_map(|t| normalize_type(t)) {
        if !from_existing_schema.contains(&t) {
            from_existing_schema.push(t);
        }
    }

    let used_type = match from_existing_schema.first() {
        Some(first) => first.clone(),
        None => {
            let inferred = rules.infer_or_default(metadata);
            debug!("[build_schema_draft] No existing schema, inferred '{inferred}'");
            inferred
        }
    };

    let mut fields = Map::new();
    fields.insert("@context".into(), Value::from(SCHEMA_CONTEXT));
    fields.insert("@type".into(), Value::from(used_type.as_str()));
    fields.insert("url".into(), Value::from(metadata.url.as_str()));

    let title = non_blank(metadata.title.as_deref());
    if let Some(title) = title {
        fields.insert("name".into(), Value::from(title));
        if ARTICLE_TYPES.contains(&used_type.as_str()) {
            fields.insert("headline".into(), Value::from(title));
        }
    }
    if let Some(description) = non_blank(metadata.description.as_deref()) {
        fields.insert("description".into(), Value::from(description));
    }
    if let Some(image) = metadata.og("image") {
        fields.insert("image".into(), Value::from(image.trim()));
    }
    if let Some(lang) = non_blank(metadata.lang.as_deref()) {
        fields.insert("inLanguage".into(), Value::from(lang));
    }

    SchemaDraft {
        used_type,
        from_existing_schema,
        fields,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Text statistics returned next to, never inside, the JSON-LD object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextExtract {
    pub text: String,
    #[serde(flatten)]
    pub features: TextFeatures,
}

/// The `/schema` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSuggestion {
    pub from_existing_schema: Vec<String>,
    pub used_type: String,
    pub schema: Value,
    pub extract: TextExtract,
}

impl SchemaSuggestion {
    pub fn new(draft: SchemaDraft, extract: TextExtract) -> Self {
        let schema = draft.to_json_ld();
        Self {
            from_existing_schema: draft.from_existing_schema,
            used_type: draft.used_type,
            schema,
            extract,
        }
    }
}
