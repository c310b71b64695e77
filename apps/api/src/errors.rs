use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// `ModelNotReady` is recovered inside the recommendation pipeline (phase 1
/// degrades to an empty shortlist); it only reaches HTTP when training
/// itself cannot produce a usable model.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("data error: {0}")]
    Data(String),

    #[error("model not ready: {0}")]
    ModelNotReady(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Data(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "DATA_ERROR", msg.clone()),
            AppError::ModelNotReady(msg) => {
                tracing::error!("Model not ready: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_NOT_READY",
                    msg.clone(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_maps_to_422() {
        let resp = AppError::Data("no training data".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_model_not_ready_maps_to_503() {
        let resp = AppError::ModelNotReady("empty vocabulary".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let resp = AppError::Validation("bad email".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
