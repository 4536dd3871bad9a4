use axum::{routing::post, Router};

use crate::{handlers::auth_otp, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        // Email an OTP for signup verification
        .route("/send-otp", post(auth_otp::send_otp))

        // Verify OTP and echo the profile
        .route("/verify-otp", post(auth_otp::verify_otp))

        // Persist a new user account
        .route("/register", post(auth_otp::register))
}
