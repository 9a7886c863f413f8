//! Parking Request API
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/parking-requests | POST | submit |
//! | /api/parking-requests?status= | GET | list, newest first |
//! | /api/parking-requests/user/{emp_id} | GET | one employee's requests |

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use shared::models::{ParkingRequest, ParkingRequestCreate, ParkingRequestDetail, RequestStatus};

use super::extract::Json;
use crate::allocation::AllocationError;
use crate::core::ServerState;
use crate::db::repository::{parking_request, user};
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/parking-requests", get(list).post(create))
        .route("/api/parking-requests/user/{emp_id}", get(list_for_user))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// POST /api/parking-requests
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ParkingRequestCreate>,
) -> AppResult<Json<ParkingRequest>> {
    let request = state.engine.submit(payload).await?;
    Ok(Json(request))
}

/// GET /api/parking-requests
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ParkingRequestDetail>>> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<RequestStatus>().map_err(|e| {
            AppError::validation(e.to_string()).with_detail("field", "status")
        })?),
    };

    let requests = parking_request::find_all_detail(state.pool(), status).await?;
    Ok(Json(requests))
}

/// GET /api/parking-requests/user/{emp_id}
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(emp_id): Path<String>,
) -> AppResult<Json<Vec<ParkingRequestDetail>>> {
    let found = user::find_by_emp_id(state.pool(), &emp_id)
        .await?
        .ok_or(AllocationError::UserNotFound(emp_id))?;

    let requests = parking_request::find_detail_by_user(state.pool(), &found.id).await?;
    Ok(Json(requests))
}
