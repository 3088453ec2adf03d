use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::layout::ExportError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// `retryable` in the body tells the client whether the same request may
/// succeed if sent again unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    /// The model answered, but not with a valid package.
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String, bool) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), false),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), false)
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                    true,
                )
            }
            AppError::InvalidPackage(msg) => {
                tracing::error!("Invalid package from model: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "INVALID_PACKAGE",
                    "The generated package was incomplete. Please try again.".to_string(),
                    true,
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                match e {
                    StoreError::Unavailable(_) => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORAGE_UNAVAILABLE",
                        "Storage is unavailable right now".to_string(),
                        true,
                    ),
                    StoreError::Corrupt { .. } | StoreError::UnsupportedVersion { .. } => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "STORED_DATA_UNREADABLE",
                        "The saved data could not be read".to_string(),
                        false,
                    ),
                }
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    "The PDF could not be created. Please try again.".to_string(),
                    true,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    false,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retryable) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": retryable
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request_and_not_retryable() {
        let (status, code, message, retryable) =
            AppError::Validation("bad".to_string()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(message, "bad");
        assert!(!retryable);
    }

    #[test]
    fn test_export_failure_is_retryable() {
        let (status, code, _, retryable) =
            AppError::from(ExportError::Task("panicked".to_string())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "EXPORT_FAILED");
        assert!(retryable);
    }

    #[test]
    fn test_storage_errors_split_by_cause() {
        let (status, _, _, retryable) =
            AppError::from(StoreError::Unavailable("down".to_string())).parts();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(retryable);

        let (status, code, _, retryable) = AppError::from(StoreError::Corrupt {
            key: "k".to_string(),
            reason: "eof".to_string(),
        })
        .parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "STORED_DATA_UNREADABLE");
        assert!(!retryable);
    }

    #[test]
    fn test_llm_message_is_not_leaked() {
        let (_, _, message, _) = AppError::Llm("key=secret".to_string()).parts();
        assert!(!message.contains("secret"));
    }
}
