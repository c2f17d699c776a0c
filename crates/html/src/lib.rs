//! # `schemascope-html`: Structured Data Extraction
//!
//! Parses an HTML document and pulls out everything the analysis needs:
//! JSON-LD blocks, Microdata items, OpenGraph properties, the title, the meta
//! description, the document language, signal elements and the visible text.
//!
//! Parsing is lenient. Malformed JSON-LD blocks are skipped with a warning and
//! never fail the extraction.

use schemascope::constants::SIGNAL_TAGS;
use schemascope::entities::{collect_types, normalize_type, page_entities};
use schemascope::{ExtractedMetadata, ExtractedPage};
use scraper::{ElementRef, Html, Node, Selector};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const JSON_LD_TYPE: &str = "application/ld+json";
const HIDDEN_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "template", "head"];

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    selector(css)
        .map(|s| document.select(&s).collect())
        .unwrap_or_default()
}

/// Extracts the metadata and the visible text of a page.
pub fn extract_page(html: &str, url: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let mut metadata = ExtractedMetadata {
        url: url.to_string(),
        title: title(&document),
        description: meta_description(&document),
        lang: document
            .root_element()
            .value()
            .attr("lang")
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string),
        raw_jsonld: json_ld_blocks(&document),
        microdata: microdata_items(&document),
        open_graph: open_graph(&document),
        tags: SIGNAL_TAGS
            .iter()
            .filter(|tag| !select_all(&document, tag).is_empty())
            .map(|tag| tag.to_string())
            .collect(),
        ..Default::default()
    };
    metadata.existing_schema_types = collect_types(&page_entities(&metadata));

    debug!(
        "Extracted {} JSON-LD blocks, {} microdata items, types {:?} from {url}",
        metadata.raw_jsonld.len(),
        metadata.microdata.len(),
        metadata.existing_schema_types
    );

    ExtractedPage {
        metadata,
        text: visible_text(&document),
    }
}

/// Extracts only the metadata of a page.
pub fn extract_metadata(html: &str, url: &str) -> ExtractedMetadata {
    extract_page(html, url).metadata
}

/// Parses every `application/ld+json` script, in document order.
pub fn json_ld_blocks(document: &Html) -> Vec<Value> {
    select_all(document, "script[type]")
        .into_iter()
        .filter(|script| {
            script
                .value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_TYPE))
        })
        .enumerate()
        .filter_map(|(i, script)| {
            let raw: String = script.text().collect();
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Skipping malformed JSON-LD block #{i}: {e}");
                    None
                }
            }
        })
        .collect()
}

fn title(document: &Html) -> Option<String> {
    select_all(document, "title")
        .first()
        .map(|t| collapse(&t.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn meta_description(document: &Html) -> Option<String> {
    select_all(document, "meta[name]")
        .into_iter()
        .find(|m| {
            m.value()
                .attr("name")
                .is_some_and(|n| n.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|m| m.value().attr("content"))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Collects `og:*` properties. The first occurrence of a property wins.
fn open_graph(document: &Html) -> BTreeMap<String, String> {
    let mut og_tags = BTreeMap::new();
    for element in select_all(document, r#"meta[property^="og:"]"#) {
        if let (Some(property), Some(content)) = (
            element.value().attr("property"),
            element.value().attr("content"),
        ) {
            og_tags
                .entry(property.trim().to_ascii_lowercase())
                .or_insert_with(|| content.trim().to_string());
        }
    }
    og_tags
}

// --- Microdata ---

/// Converts top-level Microdata items into JSON-LD shaped objects.
pub fn microdata_items(document: &Html) -> Vec<Value> {
    select_all(document, "[itemscope]")
        .into_iter()
        .filter(|item| item.value().attr("itemprop").is_none())
        .map(microdata_item)
        .collect()
}

fn microdata_item(item: ElementRef) -> Value {
    let mut properties = Map::new();
    let element = item.value();

    if let Some(itemtype) = element.attr("itemtype") {
        let types: Vec<Value> = itemtype
            .split_whitespace()
            .map(|t| Value::from(normalize_type(t).unwrap_or_else(|| t.to_string())))
            .collect();
        match types.len() {
            0 => {}
            1 => {
                properties.insert("@type".into(), types[0].clone());
            }
            _ => {
                properties.insert("@type".into(), Value::Array(types));
            }
        }
    }
    if let Some(id) = element.attr("itemid") {
        properties.insert("@id".into(), Value::from(id.trim()));
    }

    collect_properties(item, &mut properties);
    Value::Object(properties)
}

fn collect_properties(scope: ElementRef, properties: &mut Map<String, Value>) {
    for child in scope.children().filter_map(ElementRef::wrap) {
        let element = child.value();
        let nested = element.attr("itemscope").is_some();
        if let Some(names) = element.attr("itemprop") {
            let value = if nested {
                microdata_item(child)
            } else {
                property_value(child)
            };
            for name in names.split_whitespace() {
                add_property(properties, name, value.clone());
            }
        }
        if !nested {
            collect_properties(child, properties);
        }
    }
}

/// Repeated properties become lists.
fn add_property(properties: &mut Map<String, Value>, name: &str, value: Value) {
    match properties.get_mut(name) {
        None => {
            properties.insert(name.to_string(), value);
        }
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

fn property_value(element: ElementRef) -> Value {
    let el = element.value();
    let attr = match el.name() {
        "meta" => el.attr("content"),
        "audio" | "embed" | "iframe" | "img" | "source" | "track" | "video" => el.attr("src"),
        "a" | "area" | "link" => el.attr("href"),
        "object" => el.attr("data"),
        "data" | "meter" => el.attr("value"),
        "time" => el.attr("datetime"),
        _ => None,
    };
    let text = match attr {
        Some(value) => value.trim().to_string(),
        None => collapse(&element.text().collect::<String>()),
    };
    Value::from(text)
}

// --- Visible Text ---

/// The text a reader would see: the body's text nodes, without scripts and
/// styles, whitespace collapsed.
pub fn visible_text(document: &Html) -> String {
    let root = select_all(document, "body")
        .into_iter()
        .next()
        .unwrap_or_else(|| document.root_element());
    let mut pieces = Vec::new();
    collect_text(root, &mut pieces);
    collapse(&pieces.join(" "))
}

fn collect_text<'a>(element: ElementRef<'a>, pieces: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => pieces.push(&**text),
            Node::Element(e) if HIDDEN_ELEMENTS.contains(&e.name()) => {}
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, pieces);
                }
            }
            _ => {}
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
