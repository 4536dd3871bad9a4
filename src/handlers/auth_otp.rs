use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use mongodb::{bson::doc, Collection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::database::connection::USERS_COLLECTION;
use crate::errors::{AppError, Result};
use crate::models::user::{RegisterRequest, User, UserProfile};
use crate::services::otp_service::{OtpService, VerifyOutcome};
use crate::state::AppState;

// Request DTOs
#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub otp: OtpCode,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    // Accepted from the signup form but never persisted here.
    #[serde(default)]
    #[allow(dead_code)]
    pub password: String,
}

/// Clients send the code either as a JSON number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OtpCode {
    Number(u64),
    Text(String),
}

impl OtpCode {
    pub fn digits(&self) -> String {
        match self {
            OtpCode::Number(n) => n.to_string(),
            OtpCode::Text(s) => s.trim().to_string(),
        }
    }
}

// Response DTOs
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    pub user: UserProfile,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

// 1. Send OTP
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> impl IntoResponse {
    if req.validate().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("Email is required")),
        )
            .into_response();
    }

    let code = OtpService::generate_code();

    // Store only after the transport handoff succeeds, so a failed send
    // leaves no pending code behind.
    match state.email_service.send_otp(&req.email, &code).await {
        Ok(()) => {
            state.otp_service.issue(&req.email, &code);
            (
                StatusCode::OK,
                Json(MessageResponse::new("OTP sent successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Error sending OTP: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Failed to send OTP")),
            )
                .into_response()
        }
    }
}

// 2. Verify OTP
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> impl IntoResponse {
    if req.email.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("Email is required")),
        )
            .into_response();
    }

    match state.otp_service.verify(&req.email, &req.otp.digits()) {
        VerifyOutcome::Verified => (
            StatusCode::OK,
            Json(VerifyOtpResponse {
                message: "OTP verified successfully".to_string(),
                user: UserProfile {
                    first_name: req.first_name,
                    last_name: req.last_name,
                    email: req.email,
                },
            }),
        )
            .into_response(),
        VerifyOutcome::NotPending => (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("No OTP pending for this email")),
        )
            .into_response(),
        VerifyOutcome::Expired => (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("OTP has expired")),
        )
            .into_response(),
        VerifyOutcome::Mismatch => (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("OTP verification failed")),
        )
            .into_response(),
    }
}

// 3. Register user
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>> {
    if req.validate().is_err() {
        return Err(AppError::invalid_data("All fields are required"));
    }

    let users: Collection<User> = state.db.collection(USERS_COLLECTION);

    if users.find_one(doc! { "email": &req.email }).await?.is_some() {
        return Err(AppError::UserAlreadyExists);
    }

    let password_hash = hash(&req.password, DEFAULT_COST)?;

    let user = User {
        id: None,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password_hash,
        created_at: Utc::now(),
    };

    users.insert_one(&user).await?;
    tracing::info!(email = %user.email, "User registered");

    Ok(Json(MessageResponse::new("User registered successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_code_accepts_number_or_string() {
        let from_number: OtpCode = serde_json::from_str("4821").unwrap();
        let from_text: OtpCode = serde_json::from_str("\"4821\"").unwrap();
        assert_eq!(from_number.digits(), "4821");
        assert_eq!(from_text.digits(), "4821");
    }

    #[test]
    fn verify_request_reads_camel_case_profile_fields() {
        let req: VerifyOtpRequest = serde_json::from_value(serde_json::json!({
            "otp": "4821",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "hunter2",
        }))
        .unwrap();
        assert_eq!(req.first_name, "Ada");
        assert_eq!(req.otp.digits(), "4821");
    }

    #[test]
    fn send_otp_request_defaults_to_empty_email() {
        let req: SendOtpRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }
}
