use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemascope::AnalysisError;
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur within
/// the server, allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors raised while fetching, extracting or analyzing a page.
    Analysis(AnalysisError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Analysis(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Analysis(AnalysisError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Analysis(AnalysisError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Analysis(err) => {
                let status_code = match &err {
                    AnalysisError::Validation(_) => StatusCode::BAD_REQUEST,
                    AnalysisError::Fetch { .. } => StatusCode::BAD_GATEWAY,
                    AnalysisError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                    AnalysisError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
                };
                if status_code.is_client_error() {
                    warn!("Rejected request: {err}");
                } else {
                    error!("AnalysisError: {:?}", err);
                }
                (status_code, err.to_string())
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
