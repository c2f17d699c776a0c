//! # Schema.org Entity Helpers
//!
//! Flattens JSON-LD blocks into individual entities and normalizes `@type`
//! values into plain Schema.org type names.

use serde_json::{Map, Value};

use crate::types::ExtractedMetadata;

const TYPE_PREFIXES: [&str; 3] = ["https://schema.org/", "http://schema.org/", "schema:"];

/// Normalizes a raw `@type` value to a bare Schema.org type name.
///
/// Returns `None` for anything that is not a well-formed type name.
pub fn normalize_type(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let bare = TYPE_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    let mut chars = bare.chars();
    let first = chars.next()?;
    if first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric()) {
        Some(bare.to_string())
    } else {
        None
    }
}

/// Returns the recognized types declared by an entity, in declaration order.
///
/// Both `@type` and the legacy `type` key are honoured, as a string or a list.
pub fn entity_types(entity: &Map<String, Value>) -> Vec<String> {
    let raw = entity.get("@type").or_else(|| entity.get("type"));
    match raw {
        Some(Value::String(s)) => normalize_type(s).into_iter().collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(normalize_type)
            .collect(),
        _ => Vec::new(),
    }
}

/// Flattens a parsed JSON-LD block into its entities.
///
/// Top-level arrays and `@graph` members become separate entities. A container
/// object that only holds a `@graph` is not itself an entity.
pub fn flatten_block(block: &Value) -> Vec<Map<String, Value>> {
    let mut out = Vec::new();
    collect(block, &mut out);
    out
}

fn collect(value: &Value, out: &mut Vec<Map<String, Value>>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect(item, out)),
        Value::Object(map) => {
            if let Some(graph) = map.get("@graph") {
                collect(graph, out);
                let has_own_content = map
                    .keys()
                    .any(|k| k != "@graph" && k != "@context" && k != "@id");
                if !has_own_content {
                    return;
                }
            }
            let mut entity = map.clone();
            entity.remove("@graph");
            out.push(entity);
        }
        _ => {}
    }
}

/// All entities found on a page: flattened JSON-LD followed by Microdata items.
pub fn page_entities(metadata: &ExtractedMetadata) -> Vec<Map<String, Value>> {
    metadata
        .raw_jsonld
        .iter()
        .flat_map(flatten_block)
        .chain(
            metadata
                .microdata
                .iter()
                .filter_map(|item| item.as_object().cloned()),
        )
        .collect()
}

/// Collects the recognized types of a sequence of entities, de-duplicated in
/// first-seen order.
pub fn collect_types<'a, I>(entities: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    let mut types: Vec<String> = Vec::new();
    for entity in entities {
        for t in entity_types(entity) {
            if !types.contains(&t) {
                types.push(t);
            }
        }
    }
    types
}

/// True when a field holds a usable value: present, not null, not a blank
/// string, not an empty list or object.
pub fn has_value(entity: &Map<String, Value>, field: &str) -> bool {
    match entity.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_type_strips_prefixes() {
        assert_eq!(normalize_type("Article").as_deref(), Some("Article"));
        assert_eq!(
            normalize_type("https://schema.org/Product").as_deref(),
            Some("Product")
        );
        assert_eq!(normalize_type("schema:Event").as_deref(), Some("Event"));
        assert_eq!(normalize_type(""), None);
        assert_eq!(normalize_type("not a type"), None);
        assert_eq!(normalize_type("http://example.com/Thing"), None);
    }

    #[test]
    fn flatten_block_expands_graph_and_arrays() {
        let block = json!({
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "Organization", "name": "Acme"},
                {"@type": "WebSite", "name": "Acme Site"}
            ]
        });
        let entities = flatten_block(&block);
        assert_eq!(entities.len(), 2);
        assert_eq!(entity_types(&entities[0]), vec!["Organization"]);

        let list = json!([{"@type": "Person"}, {"@type": ["Product", "Thing"]}]);
        let types = collect_types(&flatten_block(&list));
        assert_eq!(types, vec!["Person", "Product", "Thing"]);
    }

    #[test]
    fn has_value_treats_blank_values_as_missing() {
        let entity = json!({"a": "", "b": [], "c": {}, "d": null, "e": 0, "f": "x"});
        let map = entity.as_object().unwrap();
        for field in ["a", "b", "c", "d", "missing"] {
            assert!(!has_value(map, field), "{field}");
        }
        assert!(has_value(map, "e"));
        assert!(has_value(map, "f"));
    }
}
