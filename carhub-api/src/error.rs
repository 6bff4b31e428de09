use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use carhub_core::CoreError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("search timed out after {0}ms")]
    Timeout(u64),
    #[error("{0}")]
    InternalServerError(String),
}

impl AppError {
    /// Label used for the `outcome` dimension of the search counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::NotFoundError(_) => "not_found",
            AppError::Timeout(_) => "timeout",
            AppError::InternalServerError(_) => "store_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            // An unknown pickup location is a bad request, not a missing resource
            AppError::NotFoundError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Timeout(ms) => {
                tracing::warn!("Search deadline of {}ms exceeded", ms);
                (StatusCode::GATEWAY_TIMEOUT, "Search timed out".to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::NotFound(msg) => AppError::NotFoundError(msg),
            CoreError::Timeout(ms) => AppError::Timeout(ms),
            CoreError::StoreError(source) => AppError::InternalServerError(source.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::ValidationError("from is required".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFoundError("location".into()), StatusCode::BAD_REQUEST),
            (AppError::Timeout(5000), StatusCode::GATEWAY_TIMEOUT),
            (AppError::InternalServerError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_store_error_becomes_internal() {
        let err: AppError = CoreError::StoreError("connection reset".into()).into();
        assert_eq!(err.outcome(), "store_error");
        assert!(matches!(err, AppError::InternalServerError(msg) if msg == "connection reset"));
    }
}
