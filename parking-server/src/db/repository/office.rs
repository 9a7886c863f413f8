//! Office Repository

use super::RepoResult;
use chrono::Utc;
use shared::models::{Office, OfficeCreate, VehicleType};
use sqlx::{Executor, Sqlite};

const SELECT_OFFICE: &str = "SELECT id, name, location, total_car_slots, total_bike_slots, \
     available_car_slots, available_bike_slots, created_at FROM offices";

pub async fn find_all<'e, E>(executor: E) -> RepoResult<Vec<Office>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let offices = sqlx::query_as::<_, Office>(&format!(
        "{SELECT_OFFICE} ORDER BY created_at, rowid"
    ))
    .fetch_all(executor)
    .await?;
    Ok(offices)
}

pub async fn find_by_id<'e, E>(executor: E, id: &str) -> RepoResult<Option<Office>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let office = sqlx::query_as::<_, Office>(&format!("{SELECT_OFFICE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(office)
}

/// Oldest office, if any
pub async fn find_first<'e, E>(executor: E) -> RepoResult<Option<Office>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let office = sqlx::query_as::<_, Office>(&format!(
        "{SELECT_OFFICE} ORDER BY created_at, rowid LIMIT 1"
    ))
    .fetch_optional(executor)
    .await?;
    Ok(office)
}

/// Create an office with availability equal to its totals
pub async fn create<'e, E>(executor: E, data: &OfficeCreate) -> RepoResult<Office>
where
    E: Executor<'e, Database = Sqlite>,
{
    let office = Office {
        id: uuid::Uuid::new_v4().to_string(),
        name: data.name.trim().to_string(),
        location: data.location.trim().to_string(),
        total_car_slots: data.total_car_slots,
        total_bike_slots: data.total_bike_slots,
        available_car_slots: data.total_car_slots,
        available_bike_slots: data.total_bike_slots,
        created_at: Utc::now(),
    };
    insert(executor, &office).await
}

pub async fn insert<'e, E>(executor: E, office: &Office) -> RepoResult<Office>
where
    E: Executor<'e, Database = Sqlite>,
{
    let created = sqlx::query_as::<_, Office>(
        "INSERT INTO offices (id, name, location, total_car_slots, total_bike_slots, \
         available_car_slots, available_bike_slots, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING id, name, location, total_car_slots, total_bike_slots, \
         available_car_slots, available_bike_slots, created_at",
    )
    .bind(&office.id)
    .bind(&office.name)
    .bind(&office.location)
    .bind(office.total_car_slots)
    .bind(office.total_bike_slots)
    .bind(office.available_car_slots)
    .bind(office.available_bike_slots)
    .bind(office.created_at)
    .fetch_one(executor)
    .await?;
    Ok(created)
}

/// Insert `office` only while the table is empty
///
/// Returns whether the row was inserted.
pub async fn insert_if_empty<'e, E>(executor: E, office: &Office) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO offices (id, name, location, total_car_slots, total_bike_slots, \
         available_car_slots, available_bike_slots, created_at) \
         SELECT ?, ?, ?, ?, ?, ?, ?, ? \
         WHERE NOT EXISTS (SELECT 1 FROM offices)",
    )
    .bind(&office.id)
    .bind(&office.name)
    .bind(&office.location)
    .bind(office.total_car_slots)
    .bind(office.total_bike_slots)
    .bind(office.available_car_slots)
    .bind(office.available_bike_slots)
    .bind(office.created_at)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Take one slot of `vehicle_type` if any is left
///
/// Returns `(total, available_after)`, or `None` when the office is
/// unknown or the pool is exhausted. The `available > 0` guard keeps the
/// counter from going negative under concurrent approvals.
pub async fn decrement_available<'e, E>(
    executor: E,
    office_id: &str,
    vehicle_type: VehicleType,
) -> RepoResult<Option<(i64, i64)>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = match vehicle_type {
        VehicleType::Car => {
            "UPDATE offices SET available_car_slots = available_car_slots - 1 \
             WHERE id = ? AND available_car_slots > 0 \
             RETURNING total_car_slots, available_car_slots"
        }
        VehicleType::Bike => {
            "UPDATE offices SET available_bike_slots = available_bike_slots - 1 \
             WHERE id = ? AND available_bike_slots > 0 \
             RETURNING total_bike_slots, available_bike_slots"
        }
    };
    let row = sqlx::query_as::<_, (i64, i64)>(sql)
        .bind(office_id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}
