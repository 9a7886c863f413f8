//! Shared types for the parking service
//!
//! Domain models, HTTP DTOs and the unified error system, used by
//! `parking-server` and by anything that talks to its API.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorResponse, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
