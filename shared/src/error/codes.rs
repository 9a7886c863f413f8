//! Unified error codes for the parking service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Verification (OTP) errors
//! - 4xxx: Parking errors (40xx lookups, 41xx allocation)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Verification ====================
    /// No passcode issued for this address (or already consumed)
    OtpNotFound = 3001,
    /// Passcode has expired
    OtpExpired = 3002,
    /// Passcode does not match
    OtpInvalid = 3003,

    // ==================== 4xxx: Parking ====================
    /// Office not found
    OfficeNotFound = 4001,
    /// Parking request not found
    ParkingRequestNotFound = 4002,
    /// User (employee) not found
    UserNotFound = 4003,
    /// No slot left for this vehicle type
    SlotCapacityExceeded = 4101,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 4102,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",

            // Verification
            ErrorCode::OtpNotFound => "OTP not found or expired",
            ErrorCode::OtpExpired => "OTP expired",
            ErrorCode::OtpInvalid => "Invalid OTP",

            // Parking
            ErrorCode::OfficeNotFound => "Office not found",
            ErrorCode::ParkingRequestNotFound => "Request not found",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::SlotCapacityExceeded => "No parking slots available",
            ErrorCode::InvalidStatusTransition => "Status change is not allowed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),

            // Verification
            3001 => Ok(ErrorCode::OtpNotFound),
            3002 => Ok(ErrorCode::OtpExpired),
            3003 => Ok(ErrorCode::OtpInvalid),

            // Parking
            4001 => Ok(ErrorCode::OfficeNotFound),
            4002 => Ok(ErrorCode::ParkingRequestNotFound),
            4003 => Ok(ErrorCode::UserNotFound),
            4101 => Ok(ErrorCode::SlotCapacityExceeded),
            4102 => Ok(ErrorCode::InvalidStatusTransition),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
