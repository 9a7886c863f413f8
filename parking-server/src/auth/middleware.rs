//! Authentication middleware
//!
//! Axum middleware for the admin routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::ErrorCode;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Admin middleware - requires a valid bearer token with an admin role
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>` and
/// injects [`CurrentUser`] into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - paths outside `/api/admin/`
/// - `/api/admin/login`
/// - every request when `ADMIN_AUTH_REQUIRED=false`; a valid token is
///   still picked up so decisions record who made them
///
/// # Errors
///
/// | Error | HTTP |
/// |-------|------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Invalid token | 401 TokenInvalid |
/// | Not an admin role | 403 AdminRequired |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    if req.method() == http::Method::OPTIONS
        || !path.starts_with("/api/admin/")
        || path == "/api/admin/login"
    {
        return Ok(next.run(req).await);
    }

    let enforce = state.config.admin_auth_required;
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(JwtService::extract_from_header) {
        Some(token) => token,
        None if !enforce => return Ok(next.run(req).await),
        None => {
            security_log!(WARN, "auth_missing", uri = %req.uri());
            return Err(AppError::not_authenticated());
        }
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(_) if !enforce => return Ok(next.run(req).await),
        Err(e) => {
            security_log!(
                WARN,
                "auth_failed",
                error = %e,
                uri = %req.uri()
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    let user = CurrentUser::from(claims);
    if enforce && !user.is_admin() {
        security_log!(
            WARN,
            "admin_required",
            email = %user.email,
            role = user.role.as_str()
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
