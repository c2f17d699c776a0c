//! # Page Handlers
//!
//! Endpoints that fetch a single page and report on its structured data: the
//! schema suggestion, the raw JSON-LD blocks, the full extraction and the
//! prioritized analysis.

use super::{fetch_page, AppError, AppState};
use crate::types::{AppJson, AppQuery, ExistingSchemaResponse, ExtractSchemaResponse, UrlRequest};
use axum::{extract::State, Json};
use schemascope::{analyze_page, build_schema_draft, Analysis, SchemaSuggestion, TextExtract};
use schemascope_text::{compute_features, excerpt};
use tracing::info;

/// Handler for `/schema`: proposes a JSON-LD object for the page.
pub async fn schema_handler(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UrlRequest>,
) -> Result<Json<SchemaSuggestion>, AppError> {
    info!("Received schema request for: {}", payload.url);
    let page = fetch_page(&app_state, &payload.url).await?;

    let draft = build_schema_draft(&page.metadata, &app_state.type_rules);
    let extract = TextExtract {
        text: excerpt(&page.text, app_state.config.extract.excerpt_chars),
        features: compute_features(&page.text),
    };
    info!(
        "Suggested '{}' for {} (existing: {:?})",
        draft.used_type(),
        page.metadata.url,
        draft.from_existing_schema()
    );

    Ok(Json(SchemaSuggestion::new(draft, extract)))
}

/// Handler for `GET /existing-schema?url=`.
pub async fn existing_schema_query_handler(
    State(app_state): State<AppState>,
    AppQuery(params): AppQuery<UrlRequest>,
) -> Result<Json<ExistingSchemaResponse>, AppError> {
    existing_schema(&app_state, &params.url).await
}

/// Handler for `POST /existing-schema`.
pub async fn existing_schema_handler(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UrlRequest>,
) -> Result<Json<ExistingSchemaResponse>, AppError> {
    existing_schema(&app_state, &payload.url).await
}

async fn existing_schema(
    app_state: &AppState,
    url: &str,
) -> Result<Json<ExistingSchemaResponse>, AppError> {
    info!("Received existing-schema request for: {url}");
    let page = fetch_page(app_state, url).await?;
    Ok(Json(ExistingSchemaResponse {
        schemas: page.metadata.raw_jsonld,
    }))
}

/// Handler for `/extract-schema`: returns the extraction unanalyzed.
pub async fn extract_schema_handler(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UrlRequest>,
) -> Result<Json<ExtractSchemaResponse>, AppError> {
    info!("Received extract-schema request for: {}", payload.url);
    let page = fetch_page(&app_state, &payload.url).await?;
    Ok(Json(ExtractSchemaResponse {
        schemas: page.metadata,
    }))
}

/// Handler for `/analyze`: the prioritized structured-data report.
pub async fn analyze_handler(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<UrlRequest>,
) -> Result<Json<Analysis>, AppError> {
    info!("Received analyze request for: {}", payload.url);
    let page = fetch_page(&app_state, &payload.url).await?;

    let analysis = analyze_page(&page.metadata, &app_state.type_rules);
    info!(
        critical = analysis.summary.critical_issues,
        recommended = analysis.summary.recommended_issues,
        optional = analysis.summary.optional_issues,
        "Analyzed {}",
        analysis.url
    );
    Ok(Json(analysis))
}
