//! # Shared Test Fixtures
//!
//! HTML pages, sitemap documents and an in-memory `PageFetcher` used by the
//! integration tests of the workspace crates.

use async_trait::async_trait;
use schemascope::{AnalysisError, PageFetcher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

// --- HTML Fixtures ---

/// A blog post with an `Article` JSON-LD block, OpenGraph tags and a
/// malformed second JSON-LD block.
pub const ARTICLE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>  Ten Tips for Structured Data </title>
  <meta name="description" content="How to make search engines understand your pages.">
  <meta property="og:type" content="article">
  <meta property="og:image" content="https://example.com/cover.png">
  <script type="application/ld+json">
  {
    "@context": "https://schema.org",
    "@type": "Article",
    "headline": "Ten Tips for Structured Data",
    "datePublished": "2024-03-01",
    "author": {"@type": "Person", "name": "Dana"}
  }
  </script>
  <script type="application/ld+json">{ this is not json }</script>
  <style>body { color: red; }</style>
</head>
<body>
  <nav><a href="/">Home</a></nav>
  <article>
    <h1>Ten Tips</h1>
    <p>Structured data helps search engines.</p>
    <script>var hidden = "not visible";</script>
  </article>
</body>
</html>"#;

/// A product page described only with Microdata.
pub const MICRODATA_PAGE: &str = r#"<html>
<head><title>Blue Kettle</title></head>
<body>
  <div itemscope itemtype="https://schema.org/Product">
    <h1 itemprop="name">Blue Kettle</h1>
    <img itemprop="image" src="https://shop.example.com/kettle.png" alt="">
    <div itemprop="offers" itemscope itemtype="https://schema.org/Offer">
      <meta itemprop="priceCurrency" content="EUR">
      <span itemprop="price">39.90</span>
    </div>
    <a itemprop="sameAs" href="https://brand.example.com/kettle">Brand</a>
    <a itemprop="sameAs" href="https://wiki.example.com/kettle">Wiki</a>
  </div>
</body>
</html>"#;

/// A page with no structured data of any kind.
pub const PLAIN_PAGE: &str = r#"<html>
<head><title>Pricing</title></head>
<body><main><p>Simple, honest pricing.</p></main></body>
</html>"#;

/// A page whose JSON-LD uses an `@graph` container.
pub const GRAPH_PAGE: &str = r#"<html lang="fr">
<head>
  <title>Acme</title>
  <script type="application/ld+json">
  {
    "@context": "https://schema.org",
    "@graph": [
      {"@type": "Organization", "name": "Acme", "url": "https://example.com/"},
      {"@type": "WebSite", "name": "Acme", "url": "https://example.com/"}
    ]
  }
  </script>
</head>
<body><p>Bienvenue</p></body>
</html>"#;

// --- Sitemap Fixtures ---

/// Renders a `urlset` sitemap listing the given locations.
pub fn urlset(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|loc| format!("  <url><loc>{loc}</loc></url>\n"))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{entries}</urlset>\n"
    )
}

/// Renders a Google image sitemap: each page carries an `image:image` entry
/// whose `image:loc` points at `{page}/cover.jpg`.
pub fn image_urlset(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|loc| {
            format!(
                "  <url>\n    <loc>{loc}</loc>\n    <image:image>\n      \
                 <image:loc>{loc}/cover.jpg</image:loc>\n    </image:image>\n  </url>\n"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"\n        \
         xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\">\n{entries}</urlset>\n"
    )
}

/// Renders a `sitemapindex` pointing at the given child sitemaps.
pub fn sitemap_index(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|loc| format!("  <sitemap><loc>{loc}</loc></sitemap>\n"))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {entries}</sitemapindex>\n"
    )
}

/// `count` page URLs under `base`, e.g. `https://example.com/page/0`.
pub fn numbered_urls(base: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{base}/page/{i}")).collect()
}

// --- Mock Fetcher ---

/// An in-memory `PageFetcher` that serves pre-programmed documents and
/// records every URL it was asked for.
#[derive(Clone, Debug, Default)]
pub struct MockFetcher {
    documents: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `url`.
    pub fn add_document(&self, url: &str, body: &str) {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert(url.to_string(), body.to_string());
        }
    }

    /// The URLs requested so far, in order.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn serve(&self, url: &Url) -> Result<String, AnalysisError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        self.documents
            .lock()
            .ok()
            .and_then(|documents| documents.get(url.as_str()).cloned())
            .ok_or_else(|| AnalysisError::Fetch {
                url: url.to_string(),
                reason: "HTTP status 404 Not Found".to_string(),
            })
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_html(&self, url: &Url) -> Result<String, AnalysisError> {
        self.serve(url)
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, AnalysisError> {
        self.serve(url)
    }
}
