//! Utilities
//!
//! - [`AppError`] / [`ErrorResponse`] from `shared::error`
//! - logging setup, input validation, date parsing

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult, ErrorResponse, ErrorCategory, ErrorCode};
