// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("No selected file")]
    MissingFilename,

    #[error("Drug not found")]
    DrugNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Email delivery error: {0}")]
    EmailDelivery(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    #[error("Service error: {0}")]
    ServiceError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::MongoDB(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string()),
            AppError::Multipart(_) => (StatusCode::BAD_REQUEST, "Invalid multipart data".to_string()),
            AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string()),
            AppError::NoFileUploaded => (StatusCode::BAD_REQUEST, "No file uploaded".to_string()),
            AppError::MissingFilename => (StatusCode::BAD_REQUEST, "No selected file".to_string()),
            AppError::DrugNotFound => (StatusCode::NOT_FOUND, "Drug not found".to_string()),
            AppError::UserAlreadyExists => (StatusCode::BAD_REQUEST, "User already exists".to_string()),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "Validation failed".to_string()),
            AppError::EmailDelivery(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send OTP".to_string()),
            AppError::Ocr(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Text extraction failed".to_string()),
            AppError::OcrUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "OCR unavailable".to_string()),
            AppError::ServiceError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Service error".to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

// Manual From implementations
impl From<axum_extra::extract::multipart::MultipartError> for AppError {
    fn from(err: axum_extra::extract::multipart::MultipartError) -> Self {
        AppError::Multipart(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ValidationError(format!("JSON parsing error: {}", err))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::ServiceError(format!("Password hashing failed: {}", err))
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn ocr(msg: impl Into<String>) -> Self {
        AppError::Ocr(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        AppError::ServiceError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_variants_map_to_400() {
        for err in [
            AppError::NoFileUploaded,
            AppError::MissingFilename,
            AppError::UserAlreadyExists,
            AppError::ValidationError("words is required".to_string()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn delivery_failure_maps_to_500() {
        let response = AppError::EmailDelivery("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn ocr_unavailable_maps_to_503() {
        let response = AppError::OcrUnavailable("tesseract missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
