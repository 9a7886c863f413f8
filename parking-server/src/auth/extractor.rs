//! Decision author extractor

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::CurrentUser;

/// Who an admin decision is recorded as
///
/// The email of the [`CurrentUser`] injected by
/// [`require_admin`](super::require_admin), or `"admin"` when the request
/// carried no valid token (only possible with admin auth disabled).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecidedBy(pub String);

impl<S> FromRequestParts<S> for DecidedBy
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let who = parts
            .extensions
            .get::<CurrentUser>()
            .map(|user| user.email.clone())
            .unwrap_or_else(|| "admin".to_string());
        Ok(DecidedBy(who))
    }
}
