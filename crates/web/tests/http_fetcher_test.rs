//! # HTTP Fetcher Tests
//!
//! Exercises `HttpFetcher` against a local mock server.

use anyhow::Result;
use schemascope::{AnalysisError, PageFetcher};
use schemascope_web::{FetchError, FetcherConfig, HttpFetcher};
use std::sync::Once;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

fn page_url(server: &MockServer, page: &str) -> Result<Url> {
    Ok(Url::parse(&server.uri())?.join(page)?)
}

#[tokio::test]
async fn test_fetch_html_returns_body() -> Result<()> {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    let html = "<html><head><title>Hi</title></head><body>Hello</body></html>";
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "schemascope-test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html, "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;
    let fetcher = HttpFetcher::new(&FetcherConfig {
        user_agent: "schemascope-test".to_string(),
        ..Default::default()
    })?;

    // --- 2. Act ---
    let body = fetcher.fetch_html(&page_url(&server, "/page")?).await?;

    // --- 3. Assert ---
    assert_eq!(body, html);
    Ok(())
}

#[tokio::test]
async fn test_non_html_content_is_an_extraction_error() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("{}", "application/json"),
        )
        .mount(&server)
        .await;
    let fetcher = HttpFetcher::new(&FetcherConfig::default())?;
    let url = page_url(&server, "/data.json")?;

    let err = fetcher.fetch_html(&url).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Extraction(_)), "{err:?}");

    // Plain text fetches skip the content-type check.
    assert_eq!(fetcher.fetch_text(&url).await?, "{}");
    Ok(())
}

#[tokio::test]
async fn test_error_status_is_a_fetch_error() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let fetcher = HttpFetcher::new(&FetcherConfig::default())?;
    let url = page_url(&server, "/missing")?;

    let err = fetcher.get_html(&url).await.unwrap_err();
    assert!(
        matches!(err, FetchError::Status { status, .. } if status.as_u16() == 404),
        "{err:?}"
    );

    match fetcher.fetch_html(&url).await.unwrap_err() {
        AnalysisError::Fetch { url: failed, reason } => {
            assert_eq!(failed, url.to_string());
            assert!(reason.contains("404"), "{reason}");
        }
        other => panic!("expected a fetch error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_slow_upstream_times_out() -> Result<()> {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html></html>", "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let fetcher = HttpFetcher::new(&FetcherConfig {
        timeout: Duration::from_millis(200),
        ..Default::default()
    })?;

    let err = fetcher
        .fetch_html(&page_url(&server, "/slow")?)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Timeout { .. }), "{err:?}");
    Ok(())
}
