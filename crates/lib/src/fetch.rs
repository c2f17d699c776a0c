use async_trait::async_trait;
use url::Url;

use crate::errors::AnalysisError;

/// The contract for retrieving remote documents.
///
/// The HTTP-backed implementation lives in the `schemascope-web` crate; the
/// sitemap reader and the server only depend on this trait.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and returns its body, failing with
    /// `AnalysisError::Extraction` when the response is not HTML.
    async fn fetch_html(&self, url: &Url) -> Result<String, AnalysisError>;

    /// Fetches any textual document (e.g. sitemap XML) without a content-type check.
    async fn fetch_text(&self, url: &Url) -> Result<String, AnalysisError>;
}
