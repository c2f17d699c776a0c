use thiserror::Error;

/// The error taxonomy shared by every stage of a page analysis.
///
/// Plugin crates (fetching, sitemap reading) map their own errors into these
/// variants so the dispatch layer can translate them into status codes in one
/// place.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A required request field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The upstream page could not be retrieved (network failure, non-2xx status).
    #[error("Failed to fetch '{url}': {reason}")]
    Fetch { url: String, reason: String },

    /// The upstream page did not answer within the configured timeout.
    #[error("Timed out fetching '{url}'")]
    Timeout { url: String },

    /// The page was retrieved but its content could not be used.
    #[error("Failed to extract content: {0}")]
    Extraction(String),
}

impl From<url::ParseError> for AnalysisError {
    fn from(err: url::ParseError) -> Self {
        AnalysisError::Validation(format!("Invalid 'url': {err}"))
    }
}
