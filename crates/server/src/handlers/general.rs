use crate::types::StatusResponse;
use axum::Json;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
    })
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
