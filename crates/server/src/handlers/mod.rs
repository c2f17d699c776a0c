//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `schemascope-server`.
//! The handlers are split into logical sub-modules based on what they work on:
//! single pages, sitemaps and raw text.

pub mod general;
pub mod page;
pub mod sitemap;
pub mod text;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use general::*;
pub use page::*;
pub use sitemap::*;
pub use text::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
use schemascope::{parse_page_url, ExtractedPage};
use schemascope_html::extract_page;

/// Fetches a caller-supplied page URL and extracts its structured data.
pub(crate) async fn fetch_page(
    app_state: &AppState,
    raw_url: &str,
) -> Result<ExtractedPage, AppError> {
    let url = parse_page_url(raw_url)?;
    let html = app_state.fetcher.fetch_html(&url).await?;
    Ok(extract_page(&html, url.as_str()))
}
