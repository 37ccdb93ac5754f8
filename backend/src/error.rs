//! Error handling for the Poultry Egg Production Predictor
//!
//! Maps domain failures onto consistent JSON error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::PredictorError;
use thiserror::Error;
use validator::ValidationErrors;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    // Model errors
    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Model error: {0}")]
    Model(String),

    // Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl From<PredictorError> for AppError {
    fn from(err: PredictorError) -> Self {
        match err {
            PredictorError::SchemaMismatch(msg) => AppError::SchemaMismatch(msg),
            other => AppError::Model(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        match fields.first() {
            Some((field, _)) => {
                let constraint = shared::InputField::from_key(field).map(|f| f.constraint());
                let message = match constraint {
                    Some(c) => format!("{} must be between {} and {}", c.label, c.min, c.max),
                    None => format!("{} is invalid", field),
                };
                AppError::Validation {
                    field: field.to_string(),
                    message,
                }
            }
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::SchemaMismatch(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "SCHEMA_MISMATCH".to_string(),
                    message: format!("Feature schema mismatch: {}", msg),
                    field: None,
                },
            ),
            AppError::Model(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "MODEL_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::Export(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "EXPORT_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
