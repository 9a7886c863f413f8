//! OTP API
//!
//! Codes are not delivered anywhere: issuance is logged, and in the
//! development environment the code is echoed back in the response.

use axum::{Router, extract::State, routing::post};
use shared::client::{MessageResponse, OtpRequest, OtpSent, OtpVerify};

use super::extract::Json;
use crate::core::ServerState;
use crate::otp::normalize_email;
use crate::utils::AppResult;
use crate::utils::validation::validate_email;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/send-otp", post(send_otp))
        .route("/api/verify-otp", post(verify_otp))
}

/// POST /api/send-otp
pub async fn send_otp(
    State(state): State<ServerState>,
    Json(req): Json<OtpRequest>,
) -> AppResult<Json<OtpSent>> {
    validate_email(req.email.trim(), "email")?;

    let code = state.otp.issue(&req.email);
    tracing::info!(email = %normalize_email(&req.email), "OTP issued");

    Ok(Json(OtpSent {
        message: "OTP sent successfully".to_string(),
        otp: state.config.is_development().then_some(code),
    }))
}

/// POST /api/verify-otp
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(req): Json<OtpVerify>,
) -> AppResult<Json<MessageResponse>> {
    state.otp.verify(&req.email, &req.otp)?;
    tracing::info!(email = %normalize_email(&req.email), "OTP verified");
    Ok(Json(MessageResponse::new("OTP verified successfully")))
}
