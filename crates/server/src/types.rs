//! Request and response payloads, and the extractors that turn axum's
//! rejections into [`AppError`]s.

use crate::errors::AppError;
use axum::extract::{FromRequest, FromRequestParts};
use schemascope::ExtractedMetadata;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `axum::Json`, rejecting with the JSON error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query`, rejecting with the JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

// --- Requests ---

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ClusterRequest {
    pub url: String,
    /// Defaults to 1, the host.
    #[serde(default)]
    pub level: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

// --- Responses ---

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SitemapResponse {
    pub sitemaps_found: usize,
    pub total_urls: usize,
    pub returned_urls: usize,
    pub urls: Vec<String>,
}

/// The raw JSON-LD blocks of a page.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExistingSchemaResponse {
    pub schemas: Vec<Value>,
}

/// Everything extracted from a page, before any analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractSchemaResponse {
    pub schemas: ExtractedMetadata,
}
