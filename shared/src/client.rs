//! Request/response bodies of the public API that are not domain models

use serde::{Deserialize, Serialize};

use crate::models::{ParkingRequest, UserRole};

// =============================================================================
// Admin auth
// =============================================================================

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub success: bool,
    pub email: String,
    pub role: UserRole,
    pub token: String,
}

// =============================================================================
// OTP
// =============================================================================

/// `POST /api/send-otp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequest {
    pub email: String,
}

/// `POST /api/verify-otp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerify {
    pub email: String,
    pub otp: String,
}

/// Issued passcode; `otp` is only echoed in development
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSent {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

// =============================================================================
// Misc
// =============================================================================

/// Plain `{"message": ...}` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of an approve/reject call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub message: String,
    pub request: ParkingRequest,
}
