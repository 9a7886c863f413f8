//! Unified error handling
//!
//! Re-exports the error system from `shared::error` so handlers can write
//! `crate::utils::AppError`.
//!
//! ```ignore
//! Err(AppError::not_found("Office default-office"))
//! ```

pub use shared::error::{AppError, AppResult, ErrorResponse, ErrorCategory, ErrorCode};
