use crate::types::{AppJson, TextRequest};
use axum::Json;
use schemascope::{EntityValidation, TextFeatures};
use schemascope_text::compute_features;
use serde_json::Value;
use tracing::info;

/// Handler for `/extract`: token statistics over the submitted text.
pub async fn extract_text_handler(AppJson(payload): AppJson<TextRequest>) -> Json<TextFeatures> {
    info!("Received extract request ({} bytes)", payload.text.len());
    Json(compute_features(&payload.text))
}

/// Handler for `/validate-entity`. Validation is not implemented yet; the
/// entity is echoed back.
pub async fn validate_entity_handler(AppJson(entity): AppJson<Value>) -> Json<EntityValidation> {
    info!("Received validate-entity request: '{}'", entity);
    Json(EntityValidation::validate(entity))
}
