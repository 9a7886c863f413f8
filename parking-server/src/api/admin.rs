//! Admin API
//!
//! | Path | Method | Meaning | Auth |
//! |------|--------|---------|------|
//! | /api/admin/login | POST | credential check, issues JWT | none |
//! | /api/admin/approve-request | POST | approve / reject | admin |
//! | /api/admin/dashboard | GET | counts and utilization | admin |
//!
//! The admin guard is applied router-wide by
//! [`require_admin`](crate::auth::require_admin).

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use shared::client::{DecisionResponse, LoginRequest, LoginResponse};
use shared::models::{DashboardSummary, RequestDecision};

use super::extract::Json;
use crate::auth::DecidedBy;
use crate::core::ServerState;
use crate::dashboard;
use crate::security_log;
use crate::utils::validation::{MAX_EMAIL_LEN, MAX_PASSWORD_LEN};
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/approve-request", post(approve_request))
        .route("/api/admin/dashboard", get(dashboard_summary))
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Oversized input is rejected like any other bad login
    if req.email.len() > MAX_EMAIL_LEN || req.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::invalid_credentials());
    }

    let Some(identity) = state.credentials.verify(&req.email, &req.password).await else {
        security_log!(
            WARN,
            "login_failed",
            email = %req.email.trim().to_lowercase()
        );
        return Err(AppError::invalid_credentials());
    };

    let token = state
        .jwt_service
        .generate_token(&identity.email, identity.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!(
        INFO,
        "login_success",
        email = %identity.email,
        role = identity.role.as_str()
    );

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        success: true,
        email: identity.email,
        role: identity.role,
        token,
    }))
}

/// POST /api/admin/approve-request
pub async fn approve_request(
    State(state): State<ServerState>,
    DecidedBy(decided_by): DecidedBy,
    Json(decision): Json<RequestDecision>,
) -> AppResult<Json<DecisionResponse>> {
    let request = state
        .engine
        .decide(
            &decision.request_id,
            decision.status,
            decision.rejection_reason.as_deref(),
            &decided_by,
        )
        .await?;

    Ok(Json(DecisionResponse {
        message: format!("Request {} successfully", request.status),
        request,
    }))
}

/// GET /api/admin/dashboard
pub async fn dashboard_summary(
    State(state): State<ServerState>,
) -> AppResult<Json<DashboardSummary>> {
    let summary = dashboard::load(state.pool()).await?;
    Ok(Json(summary))
}
