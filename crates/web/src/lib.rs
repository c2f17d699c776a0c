//! # schemascope-web: HTTP Page Fetcher
//!
//! The `reqwest`-backed implementation of `schemascope::PageFetcher`. One
//! client (and its connection pool) is built at startup and shared by every
//! request. Fetches are bounded by a timeout and never retried.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use schemascope::{AnalysisError, PageFetcher};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("schemascope/", env!("CARGO_PKG_VERSION"));

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("'{url}' answered with HTTP status {status}")]
    Status { url: String, status: StatusCode },
    #[error("'{url}' did not answer within {secs} seconds")]
    Timeout { url: String, secs: u64 },
    #[error("'{url}' returned '{content_type}' instead of HTML")]
    NotHtml { url: String, content_type: String },
}

impl From<FetchError> for AnalysisError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Client(e) => AnalysisError::Fetch {
                url: String::new(),
                reason: e.to_string(),
            },
            FetchError::Request { url, source } => AnalysisError::Fetch {
                url,
                reason: source.to_string(),
            },
            FetchError::Status { url, status } => AnalysisError::Fetch {
                url,
                reason: format!("HTTP status {status}"),
            },
            FetchError::Timeout { url, .. } => AnalysisError::Timeout { url },
            e @ FetchError::NotHtml { .. } => AnalysisError::Extraction(e.to_string()),
        }
    }
}

// --- Fetcher ---

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    fn classify(&self, url: &Url, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source: err,
            }
        }
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        info!("Fetching: {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("'{url}' answered with HTTP status {status}");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn body(&self, url: &Url, response: reqwest::Response) -> Result<String, FetchError> {
        response.text().await.map_err(|e| self.classify(url, e))
    }

    /// Fetches a page, rejecting responses that declare a non-HTML content type.
    /// A missing `Content-Type` is accepted.
    pub async fn get_html(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html(content_type) {
                return Err(FetchError::NotHtml {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }
        self.body(url, response).await
    }

    pub async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        self.body(url, response).await
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &Url) -> Result<String, AnalysisError> {
        Ok(self.get_html(url).await?)
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, AnalysisError> {
        Ok(self.get_text(url).await?)
    }
}
