//! Error handling for the Mali Farm platform
//!
//! Provides consistent error responses in English and Urdu

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_ur: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unsupported city: {0}")]
    UnsupportedCity(String),

    // External service errors
    #[error("Language model error: {0}")]
    LanguageModel(String),

    #[error("Weather service unavailable")]
    WeatherServiceUnavailable,

    #[error("Model inference error: {0}")]
    ModelInference(String),

    #[error("Model inference timed out")]
    ModelTimeout,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Field-level validation failure with an English message
    pub fn invalid_field(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: format!("{}: {}", field, message),
            message_ur: format!("غلط قدر: {}", field),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::ValidationError(_)
            | AppError::UnsupportedCity(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::LanguageModel(_) | AppError::ModelInference(_) => StatusCode::BAD_GATEWAY,
            AppError::WeatherServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ModelTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Storage(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
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
    pub message_en: String,
    pub message_ur: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_detail = match &self {
            AppError::Validation {
                field,
                message,
                message_ur,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: message.clone(),
                message_ur: message_ur.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: msg.clone(),
                message_ur: format!("درست معلومات درج کریں: {}", msg),
                field: None,
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message_en: format!("{} not found", resource),
                message_ur: format!("{} نہیں ملا", resource),
                field: None,
            },
            AppError::UnsupportedCity(city) => ErrorDetail {
                code: "UNSUPPORTED_CITY".to_string(),
                message_en: format!("Weather is not available for {}", city),
                message_ur: format!("{} کے لیے موسم دستیاب نہیں", city),
                field: Some("city".to_string()),
            },
            AppError::LanguageModel(msg) => ErrorDetail {
                code: "LANGUAGE_MODEL_ERROR".to_string(),
                message_en: format!("Assistant service error: {}", msg),
                message_ur: "معاون سروس میں خرابی".to_string(),
                field: None,
            },
            AppError::WeatherServiceUnavailable => ErrorDetail {
                code: "WEATHER_SERVICE_UNAVAILABLE".to_string(),
                message_en: "Weather service is temporarily unavailable".to_string(),
                message_ur: "موسم کی سروس عارضی طور پر دستیاب نہیں".to_string(),
                field: None,
            },
            AppError::ModelInference(msg) => ErrorDetail {
                code: "MODEL_INFERENCE_ERROR".to_string(),
                message_en: format!("Model inference failed: {}", msg),
                message_ur: "ماڈل پیشگوئی ناکام ہو گئی".to_string(),
                field: None,
            },
            AppError::ModelTimeout => ErrorDetail {
                code: "MODEL_TIMEOUT".to_string(),
                message_en: "Model inference took too long".to_string(),
                message_ur: "ماڈل پیشگوئی میں بہت دیر ہو گئی".to_string(),
                field: None,
            },
            AppError::Storage(msg) => ErrorDetail {
                code: "STORAGE_ERROR".to_string(),
                message_en: format!("Storage error: {}", msg),
                message_ur: "فائل محفوظ کرنے میں خرابی".to_string(),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message_en: format!("Configuration error: {}", msg),
                message_ur: "سرور کی ترتیب میں خرابی".to_string(),
                field: None,
            },
            AppError::Internal(msg) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: msg.clone(),
                message_ur: "سرور میں اندرونی خرابی".to_string(),
                field: None,
            },
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (self.status(), Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::invalid_field("nitrogen", "Value cannot be negative").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::ModelTimeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            AppError::LanguageModel("down".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::WeatherServiceUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::NotFound("Model file".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::UnsupportedCity("Dubai".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_body() {
        let error = AppError::Internal("Failed to encode model input".into());
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
