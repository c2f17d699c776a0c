//! # Sitemap Handlers
//!
//! `/sitemap` lists the page URLs of a sitemap; `/cluster` groups the same
//! URLs by one level of their directory hierarchy.

use super::{AppError, AppState};
use crate::types::{AppJson, ClusterRequest, SitemapResponse, UrlRequest};
use axum::{extract::State, Json};
use schemascope::{cluster_by_level, parse_page_url, Clusters};
use schemascope_sitemap::{read_sitemap, SitemapUrls};
use tracing::info;

async fn sitemap_urls(app_state: &AppState, raw_url: &str) -> Result<SitemapUrls, AppError> {
    let url = parse_page_url(raw_url)?;
    let urls = read_sitemap(
        app_state.fetcher.as_ref(),
        &url,
        app_state.config.sitemap.max_child_sitemaps,
    )
    .await?;
    Ok(urls)
}

/// Handler for `/sitemap`.
pub async fn sitemap_handler(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UrlRequest>,
) -> Result<Json<SitemapResponse>, AppError> {
    info!("Received sitemap request for: {}", payload.url);
    let SitemapUrls {
        mut urls,
        sitemaps_found,
    } = sitemap_urls(&app_state, &payload.url).await?;

    let total_urls = urls.len();
    urls.truncate(app_state.config.sitemap.url_limit);

    Ok(Json(SitemapResponse {
        sitemaps_found,
        total_urls,
        returned_urls: urls.len(),
        urls,
    }))
}

/// Handler for `/cluster`. Every URL of the sitemap is counted, not only the
/// ones `/sitemap` would return.
pub async fn cluster_handler(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<ClusterRequest>,
) -> Result<Json<Clusters>, AppError> {
    let level = payload.level.unwrap_or(1);
    info!("Received cluster request for: {} at level {level}", payload.url);
    let sitemap = sitemap_urls(&app_state, &payload.url).await?;

    let clusters = cluster_by_level(&sitemap.urls, level)?;
    Ok(Json(clusters))
}
