//! Office API

use axum::{Router, extract::State, routing::get};
use shared::models::{Office, OfficeCreate};

use super::extract::Json;
use crate::core::ServerState;
use crate::db::repository::office;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_non_negative, validate_required_text,
};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/offices", get(list).post(create))
}

/// GET /api/offices - all offices, oldest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Office>>> {
    let offices = office::find_all(state.pool()).await?;
    Ok(Json(offices))
}

/// POST /api/offices - create an office with every slot free
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OfficeCreate>,
) -> AppResult<Json<Office>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.location, "location", MAX_ADDRESS_LEN)?;
    validate_non_negative(payload.total_car_slots, "total_car_slots")?;
    validate_non_negative(payload.total_bike_slots, "total_bike_slots")?;

    let created = office::create(state.pool(), &payload).await?;
    tracing::info!(
        office_id = %created.id,
        name = %created.name,
        car_slots = created.total_car_slots,
        bike_slots = created.total_bike_slots,
        "Office created"
    );
    Ok(Json(created))
}
