//! HTTP API
//!
//! | Module | Prefix |
//! |--------|--------|
//! | [`health`] | `/health`, `/api/` |
//! | [`offices`] | `/api/offices` |
//! | [`parking_requests`] | `/api/parking-requests` |
//! | [`admin`] | `/api/admin` |
//! | [`otp`] | `/api/send-otp`, `/api/verify-otp` |

pub mod admin;
pub mod extract;
pub mod health;
pub mod offices;
pub mod otp;
pub mod parking_requests;
