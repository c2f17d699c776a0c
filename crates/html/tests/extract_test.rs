//! # HTML Extraction Tests
//!
//! Runs the extractor over the shared page fixtures.

use anyhow::Result;
use schemascope_html::{extract_metadata, extract_page, json_ld_blocks, microdata_items};
use schemascope_test_utils::{ARTICLE_PAGE, GRAPH_PAGE, MICRODATA_PAGE, PLAIN_PAGE};
use scraper::Html;
use serde_json::json;

const URL: &str = "https://example.com/blog/tips";

#[test]
fn test_article_page_metadata() -> Result<()> {
    // --- 1. Act ---
    let page = extract_page(ARTICLE_PAGE, URL);
    let metadata = &page.metadata;

    // --- 2. Assert ---
    assert_eq!(metadata.url, URL);
    assert_eq!(metadata.title.as_deref(), Some("Ten Tips for Structured Data"));
    assert_eq!(
        metadata.description.as_deref(),
        Some("How to make search engines understand your pages.")
    );
    assert_eq!(metadata.lang.as_deref(), Some("en"));
    assert_eq!(metadata.existing_schema_types, vec!["Article"]);
    // The malformed second block is skipped.
    assert_eq!(metadata.raw_jsonld.len(), 1);
    assert_eq!(metadata.raw_jsonld[0]["headline"], "Ten Tips for Structured Data");
    assert_eq!(metadata.og("type"), Some("article"));
    assert_eq!(metadata.og("image"), Some("https://example.com/cover.png"));
    assert!(metadata.has_tag("article"));
    assert!(metadata.has_tag("nav"));
    assert!(!metadata.has_tag("video"));
    Ok(())
}

#[test]
fn test_visible_text_skips_scripts_and_styles() {
    let page = extract_page(ARTICLE_PAGE, URL);
    assert_eq!(page.text, "Home Ten Tips Structured data helps search engines.");
    assert!(!page.text.contains("hidden"));
    assert!(!page.text.contains("color"));
}

#[test]
fn test_microdata_items_become_objects() -> Result<()> {
    let document = Html::parse_document(MICRODATA_PAGE);
    let items = microdata_items(&document);

    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0],
        json!({
            "@type": "Product",
            "name": "Blue Kettle",
            "image": "https://shop.example.com/kettle.png",
            "offers": {"@type": "Offer", "priceCurrency": "EUR", "price": "39.90"},
            "sameAs": ["https://brand.example.com/kettle", "https://wiki.example.com/kettle"]
        })
    );

    let metadata = extract_metadata(MICRODATA_PAGE, "https://shop.example.com/p/1");
    assert_eq!(metadata.existing_schema_types, vec!["Product"]);
    assert!(metadata.raw_jsonld.is_empty());
    Ok(())
}

#[test]
fn test_graph_types_and_language() {
    let metadata = extract_metadata(GRAPH_PAGE, "https://example.com/");
    assert_eq!(metadata.existing_schema_types, vec!["Organization", "WebSite"]);
    assert_eq!(metadata.lang.as_deref(), Some("fr"));
    assert_eq!(json_ld_blocks(&Html::parse_document(GRAPH_PAGE)).len(), 1);
}

#[test]
fn test_plain_page_has_no_structured_data() {
    let page = extract_page(PLAIN_PAGE, "https://example.com/pricing");
    let metadata = &page.metadata;
    assert!(metadata.existing_schema_types.is_empty());
    assert!(metadata.raw_jsonld.is_empty());
    assert!(metadata.microdata.is_empty());
    assert!(metadata.open_graph.is_empty());
    assert!(metadata.description.is_none());
    assert!(metadata.lang.is_none());
    assert!(metadata.has_tag("main"));
    assert_eq!(page.text, "Simple, honest pricing.");
}

#[test]
fn test_uppercase_script_type_and_array_block() {
    let html = r#"<html><head>
<script type="Application/LD+JSON">
  [{"@type": "Person", "name": "Ann"}, {"@type": "schema:Event"}]
</script>
<script type="application/ld+json">   </script>
</head><body></body></html>"#;
    let metadata = extract_metadata(html, "https://example.com/");
    assert_eq!(metadata.raw_jsonld.len(), 1);
    assert_eq!(metadata.existing_schema_types, vec!["Person", "Event"]);
}
