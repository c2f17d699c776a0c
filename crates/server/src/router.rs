use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/sitemap", post(handlers::sitemap_handler))
        .route("/cluster", post(handlers::cluster_handler))
        .route("/schema", post(handlers::schema_handler))
        .route(
            "/existing-schema",
            get(handlers::existing_schema_query_handler).post(handlers::existing_schema_handler),
        )
        .route("/extract-schema", post(handlers::extract_schema_handler))
        .route("/analyze", post(handlers::analyze_handler))
        .route("/extract", post(handlers::extract_text_handler))
        .route("/validate-entity", post(handlers::validate_entity_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
