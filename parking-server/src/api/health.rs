//! Health check routes
//!
//! | Path | Method | Meaning | Auth |
//! |------|--------|---------|------|
//! | /health | GET | liveness | none |
//! | /api/ | GET | API banner | none |

use axum::{Router, routing::get};
use serde::Serialize;

use super::extract::Json;
use crate::core::ServerState;
use shared::client::MessageResponse;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/", get(root))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Parking Management System API"))
}
