//! Default office policy
//!
//! Resolution order for a request's office:
//! 1. the requested id, when it exists
//! 2. the office with id [`DEFAULT_OFFICE_ID`]
//! 3. the oldest office
//! 4. a freshly bootstrapped default office

use chrono::Utc;
use shared::models::Office;
use sqlx::SqlitePool;

use super::{AllocationError, AllocationResult};
use crate::db::repository::{RepoResult, office};

pub const DEFAULT_OFFICE_ID: &str = "default-office";

/// The office created on an empty database
pub fn default_office() -> Office {
    Office {
        id: DEFAULT_OFFICE_ID.to_string(),
        name: "Main Office".to_string(),
        location: "Chennai".to_string(),
        total_car_slots: 50,
        total_bike_slots: 100,
        available_car_slots: 50,
        available_bike_slots: 100,
        created_at: Utc::now(),
    }
}

/// Insert the default office when no office exists yet
///
/// Returns whether it inserted.
pub async fn bootstrap_default_office(pool: &SqlitePool) -> RepoResult<bool> {
    let inserted = office::insert_if_empty(pool, &default_office()).await?;
    if inserted {
        tracing::info!(office_id = DEFAULT_OFFICE_ID, "Default office created");
    }
    Ok(inserted)
}

pub async fn resolve_office(
    pool: &SqlitePool,
    requested: Option<&str>,
) -> AllocationResult<Office> {
    if let Some(id) = requested.map(str::trim).filter(|id| !id.is_empty()) {
        if let Some(found) = office::find_by_id(pool, id).await? {
            return Ok(found);
        }
        tracing::warn!(office_id = %id, "Requested office not found, using default");
    }

    if let Some(found) = office::find_by_id(pool, DEFAULT_OFFICE_ID).await? {
        return Ok(found);
    }
    if let Some(found) = office::find_first(pool).await? {
        return Ok(found);
    }

    bootstrap_default_office(pool).await?;
    office::find_first(pool)
        .await?
        .ok_or_else(|| AllocationError::OfficeNotFound(DEFAULT_OFFICE_ID.to_string()))
}
