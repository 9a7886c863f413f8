//! Data models
//!
//! Shared between parking-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `String` (uuid v4, except the fixed `default-office`).

pub mod dashboard;
pub mod office;
pub mod parking_request;
pub mod user;

// Re-exports
pub use dashboard::*;
pub use office::*;
pub use parking_request::*;
pub use user::*;
