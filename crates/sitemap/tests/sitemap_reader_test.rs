//! # Sitemap Crate Tests
//!
//! Reads sitemaps and sitemap indexes through both the in-memory fetcher and
//! the real HTTP fetcher.

use anyhow::Result;
use schemascope::AnalysisError;
use schemascope_sitemap::read_sitemap;
use schemascope_test_utils::{numbered_urls, sitemap_index, urlset, MockFetcher};
use schemascope_web::{FetcherConfig, HttpFetcher};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_read_plain_urlset_over_http() -> Result<()> {
    // --- Arrange ---
    let server = MockServer::start().await;
    let pages = numbered_urls("https://example.com", 150);
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(urlset(&pages))
                .insert_header("Content-Type", "application/xml"),
        )
        .mount(&server)
        .await;
    let fetcher = HttpFetcher::new(&FetcherConfig::default())?;
    let url = Url::parse(&format!("{}/sitemap.xml", server.uri()))?;

    // --- Act ---
    let result = read_sitemap(&fetcher, &url, 50).await?;

    // --- Assert ---
    assert_eq!(result.sitemaps_found, 1);
    assert_eq!(result.urls.len(), 150);
    assert_eq!(result.urls[0], "https://example.com/page/0");
    assert_eq!(result.urls[149], "https://example.com/page/149");
    Ok(())
}

#[tokio::test]
async fn test_sitemap_index_is_followed() -> Result<()> {
    // --- Arrange ---
    let fetcher = MockFetcher::new();
    fetcher.add_document(
        "https://example.com/sitemap.xml",
        &sitemap_index(&[
            "https://example.com/posts.xml".to_string(),
            "https://example.com/missing.xml".to_string(),
            "https://example.com/pages.xml".to_string(),
        ]),
    );
    fetcher.add_document(
        "https://example.com/posts.xml",
        &urlset(&["https://example.com/blog/a".to_string()]),
    );
    fetcher.add_document(
        "https://example.com/pages.xml",
        &urlset(&[
            "https://example.com/about".to_string(),
            "https://example.com/contact".to_string(),
        ]),
    );
    let url = Url::parse("https://example.com/sitemap.xml")?;

    // --- Act ---
    let result = read_sitemap(&fetcher, &url, 50).await?;

    // --- Assert ---
    assert_eq!(result.sitemaps_found, 2);
    assert_eq!(
        result.urls,
        vec![
            "https://example.com/blog/a",
            "https://example.com/about",
            "https://example.com/contact"
        ]
    );
    assert_eq!(fetcher.get_calls().len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_child_sitemap_budget() -> Result<()> {
    let fetcher = MockFetcher::new();
    let children: Vec<String> = (0..5)
        .map(|i| format!("https://example.com/child-{i}.xml"))
        .collect();
    fetcher.add_document("https://example.com/index.xml", &sitemap_index(&children));
    for (i, child) in children.iter().enumerate() {
        fetcher.add_document(child, &urlset(&[format!("https://example.com/p/{i}")]));
    }

    let url = Url::parse("https://example.com/index.xml")?;
    let result = read_sitemap(&fetcher, &url, 2).await?;

    assert_eq!(result.sitemaps_found, 2);
    assert_eq!(result.urls, vec!["https://example.com/p/0", "https://example.com/p/1"]);
    Ok(())
}

#[tokio::test]
async fn test_invalid_root_document_is_an_extraction_error() -> Result<()> {
    let fetcher = MockFetcher::new();
    fetcher.add_document("https://example.com/feed.xml", "<rss><channel/></rss>");

    let url = Url::parse("https://example.com/feed.xml")?;
    let err = read_sitemap(&fetcher, &url, 50).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Extraction(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn test_missing_root_document_is_a_fetch_error() -> Result<()> {
    let fetcher = MockFetcher::new();
    let url = Url::parse("https://example.com/sitemap.xml")?;

    let err = read_sitemap(&fetcher, &url, 50).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Fetch { .. }), "{err:?}");
    Ok(())
}
