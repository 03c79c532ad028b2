use crate::domain::images::ImageIngestionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        /// Field name -> list of human-readable violations.
        details: Option<serde_json::Value>,
    },
    #[error(transparent)]
    ImageIngestion(#[from] ImageIngestionError),
    #[error("Database error: {0}")]
    Persistence(anyhow::Error),
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn validation_with_details(
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        AppError::Validation {
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Failure envelope returned by every endpoint.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = false)]
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, message, details)
            }
            // Ingestion failures carry a cause the caller can act on
            // (oversized, wrong format, host rejection); surface it verbatim.
            AppError::ImageIngestion(e) => {
                tracing::warn!("Image ingestion failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
            }
            AppError::Persistence(e) => {
                tracing::error!("Database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal server error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "success": false,
            "error": message,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::validation_with_details(
            "Validation failed",
            json!({ "contact": ["Please enter a valid phone number"] }),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn ingestion_maps_to_500_with_cause() {
        let err = AppError::from(ImageIngestionError::Oversized {
            size: 6 * 1024 * 1024,
            limit_mb: 5,
        });
        assert_eq!(err.to_string(), "Image size must be less than 5MB");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn persistence_message_is_generic() {
        let err = AppError::Persistence(anyhow::anyhow!("connection refused"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
