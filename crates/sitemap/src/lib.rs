//! # `schemascope-sitemap`: Sitemap Reader
//!
//! Fetches a sitemap through a `PageFetcher` and lists the page URLs it
//! declares. Both `urlset` documents and `sitemapindex` documents are
//! understood; child sitemaps of an index are fetched one at a time, up to a
//! configured budget.

use quick_xml::events::Event;
use quick_xml::Reader;
use schemascope::{AnalysisError, PageFetcher};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

/// Custom error types for sitemap parsing.
#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("Failed to parse sitemap XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Unexpected root element '{0}': expected <urlset> or <sitemapindex>")]
    UnknownRoot(String),
    #[error("Document has no root element")]
    Empty,
}

impl From<SitemapError> for AnalysisError {
    fn from(err: SitemapError) -> Self {
        AnalysisError::Extraction(err.to_string())
    }
}

/// A parsed sitemap document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// Page URLs, from `<urlset><url><loc>`.
    UrlSet(Vec<String>),
    /// Child sitemap URLs, from `<sitemapindex><sitemap><loc>`.
    Index(Vec<String>),
}

/// The URLs collected from a sitemap and its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapUrls {
    pub urls: Vec<String>,
    /// The number of `urlset` documents the URLs were read from.
    pub sitemaps_found: usize,
}

/// Parses a sitemap document.
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<Vec<u8>> = None;
    let mut locations = Vec::new();
    let mut depth = 0usize;
    let mut in_entry = false;
    let mut current: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                let name = e.local_name().as_ref().to_vec();
                // Entries sit directly under the root and their `loc` directly under the entry,
                // so extension elements such as `image:loc` are skipped.
                match (root.as_deref(), depth, name.as_slice()) {
                    (None, _, _) => root = Some(name),
                    (Some(_), 2, b"url" | b"sitemap") => in_entry = true,
                    (Some(_), 3, b"loc") if in_entry => current = Some(String::new()),
                    _ => {}
                }
            }
            Event::Text(e) => {
                if let Some(loc) = current.as_mut() {
                    loc.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(loc) = current.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => {
                match (depth, e.local_name().as_ref()) {
                    (3, b"loc") => {
                        if let Some(loc) = current.take() {
                            let loc = loc.trim();
                            if !loc.is_empty() {
                                locations.push(loc.to_string());
                            }
                        }
                    }
                    (2, _) => in_entry = false,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Empty(e) if root.is_none() => root = Some(e.local_name().as_ref().to_vec()),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    match root.as_deref() {
        Some(b"urlset") => Ok(SitemapDocument::UrlSet(locations)),
        Some(b"sitemapindex") => Ok(SitemapDocument::Index(locations)),
        Some(other) => Err(SitemapError::UnknownRoot(
            String::from_utf8_lossy(other).into_owned(),
        )),
        None => Err(SitemapError::Empty),
    }
}

/// Reads a sitemap, following sitemap indexes.
///
/// At most `max_child_sitemaps` child documents are fetched. A child that
/// cannot be fetched or parsed is skipped with a warning; only a failure of
/// the root document is an error.
pub async fn read_sitemap(
    fetcher: &dyn PageFetcher,
    url: &Url,
    max_child_sitemaps: usize,
) -> Result<SitemapUrls, AnalysisError> {
    info!("Reading sitemap: {url}");
    let root = fetcher.fetch_text(url).await?;

    let mut result = SitemapUrls::default();
    let mut queue = VecDeque::new();
    match parse_sitemap(&root)? {
        SitemapDocument::UrlSet(urls) => {
            result.urls = urls;
            result.sitemaps_found = 1;
            return Ok(result);
        }
        SitemapDocument::Index(children) => queue.extend(children),
    }

    let mut seen: HashSet<String> = HashSet::from([url.to_string()]);
    let mut fetched = 0;
    while let Some(child) = queue.pop_front() {
        if fetched >= max_child_sitemaps {
            warn!(
                "Sitemap index {url} lists more than {max_child_sitemaps} child sitemaps, \
                 ignoring the rest"
            );
            break;
        }
        if !seen.insert(child.clone()) {
            continue;
        }
        let Ok(child_url) = Url::parse(&child) else {
            warn!("Skipping invalid child sitemap URL '{child}'");
            continue;
        };
        fetched += 1;

        let document = match fetcher.fetch_text(&child_url).await {
            Ok(body) => parse_sitemap(&body).map_err(AnalysisError::from),
            Err(e) => Err(e),
        };
        match document {
            Ok(SitemapDocument::UrlSet(urls)) => {
                result.sitemaps_found += 1;
                result.urls.extend(urls);
            }
            Ok(SitemapDocument::Index(children)) => queue.extend(children),
            Err(e) => warn!("Skipping child sitemap {child_url}: {e}"),
        }
    }

    info!(
        "Read {} URLs from {} sitemaps under {url}",
        result.urls.len(),
        result.sitemaps_found
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urlset_with_namespace_prefix_and_cdata() {
        let xml = r#"<?xml version="1.0"?>
<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sm:url><sm:loc>https://example.com/a?x=1&amp;y=2</sm:loc></sm:url>
  <sm:url>
    <sm:loc><![CDATA[https://example.com/b]]></sm:loc><sm:lastmod>2024-01-01</sm:lastmod>
  </sm:url>
  <sm:url><sm:loc>   </sm:loc></sm:url>
</sm:urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            SitemapDocument::UrlSet(vec![
                "https://example.com/a?x=1&y=2".to_string(),
                "https://example.com/b".to_string(),
            ])
        );
    }

    #[test]
    fn ignores_image_and_video_locations_inside_entries() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1"
        xmlns:video="http://www.google.com/schemas/sitemap-video/1.1">
  <url>
    <loc>https://example.com/blog/a</loc>
    <image:image><image:loc>https://example.com/img/a.jpg</image:loc></image:image>
  </url>
  <url>
    <video:video><video:content_loc>https://example.com/v.mp4</video:content_loc></video:video>
    <loc>https://example.com/blog/b</loc>
  </url>
</urlset>"#;
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            SitemapDocument::UrlSet(vec![
                "https://example.com/blog/a".to_string(),
                "https://example.com/blog/b".to_string(),
            ])
        );
    }

    #[test]
    fn rejects_non_sitemap_documents() {
        assert!(matches!(
            parse_sitemap("<rss><channel/></rss>"),
            Err(SitemapError::UnknownRoot(root)) if root == "rss"
        ));
        assert!(matches!(parse_sitemap(""), Err(SitemapError::Empty)));
        assert!(parse_sitemap("<urlset><url><loc>x</url></urlset>").is_err());
    }
}
