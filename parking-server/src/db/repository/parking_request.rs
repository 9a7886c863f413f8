//! Parking Request Repository

use super::RepoResult;
use chrono::{DateTime, Utc};
use shared::models::{ParkingRequest, ParkingRequestDetail, RequestStatus};
use sqlx::{Executor, Sqlite};

const REQUEST_COLUMNS: &str = "id, user_id, office_id, vehicle_type, vehicle_number, \
     duration_type, parking_date, start_date, end_date, recurring_pattern, description, \
     status, slot_number, approved_by, rejection_reason, created_at, updated_at";

const SELECT_DETAIL: &str = "SELECT r.id, r.user_id, r.office_id, r.vehicle_type, \
     r.vehicle_number, r.duration_type, r.parking_date, r.start_date, r.end_date, \
     r.recurring_pattern, r.description, r.status, r.slot_number, r.approved_by, \
     r.rejection_reason, r.created_at, r.updated_at, \
     COALESCE(u.name, 'Unknown') AS user_name, \
     COALESCE(u.email, 'Unknown') AS user_email, \
     COALESCE(o.name, 'Unknown') AS office_name \
     FROM parking_requests r \
     LEFT JOIN users u ON u.id = r.user_id \
     LEFT JOIN offices o ON o.id = r.office_id";

/// Fields written when a request is decided
#[derive(Debug, Clone)]
pub struct DecisionUpdate<'a> {
    pub status: RequestStatus,
    pub slot_number: Option<&'a str>,
    pub approved_by: Option<&'a str>,
    pub rejection_reason: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

pub async fn insert<'e, E>(executor: E, request: &ParkingRequest) -> RepoResult<ParkingRequest>
where
    E: Executor<'e, Database = Sqlite>,
{
    let created = sqlx::query_as::<_, ParkingRequest>(&format!(
        "INSERT INTO parking_requests ({REQUEST_COLUMNS}) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {REQUEST_COLUMNS}"
    ))
    .bind(&request.id)
    .bind(&request.user_id)
    .bind(&request.office_id)
    .bind(request.vehicle_type)
    .bind(&request.vehicle_number)
    .bind(request.duration_type)
    .bind(&request.parking_date)
    .bind(&request.start_date)
    .bind(&request.end_date)
    .bind(&request.recurring_pattern)
    .bind(&request.description)
    .bind(request.status)
    .bind(&request.slot_number)
    .bind(&request.approved_by)
    .bind(&request.rejection_reason)
    .bind(request.created_at)
    .bind(request.updated_at)
    .fetch_one(executor)
    .await?;
    Ok(created)
}

pub async fn find_by_id<'e, E>(executor: E, id: &str) -> RepoResult<Option<ParkingRequest>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let request = sqlx::query_as::<_, ParkingRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM parking_requests WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(request)
}

/// Apply a decision if the request is still in `expected` status
///
/// Returns the updated row, or `None` when the status changed underneath
/// (or the id is unknown).
pub async fn update_decision<'e, E>(
    executor: E,
    id: &str,
    expected: RequestStatus,
    update: &DecisionUpdate<'_>,
) -> RepoResult<Option<ParkingRequest>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let request = sqlx::query_as::<_, ParkingRequest>(&format!(
        "UPDATE parking_requests \
         SET status = ?, slot_number = ?, approved_by = ?, rejection_reason = ?, updated_at = ? \
         WHERE id = ? AND status = ? \
         RETURNING {REQUEST_COLUMNS}"
    ))
    .bind(update.status)
    .bind(update.slot_number)
    .bind(update.approved_by)
    .bind(update.rejection_reason)
    .bind(update.updated_at)
    .bind(id)
    .bind(expected)
    .fetch_optional(executor)
    .await?;
    Ok(request)
}

/// All requests (optionally one status), newest first, with names joined in
pub async fn find_all_detail<'e, E>(
    executor: E,
    status: Option<RequestStatus>,
) -> RepoResult<Vec<ParkingRequestDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let requests = sqlx::query_as::<_, ParkingRequestDetail>(&format!(
        "{SELECT_DETAIL} WHERE (?1 IS NULL OR r.status = ?1) \
         ORDER BY r.created_at DESC, r.rowid DESC"
    ))
    .bind(status)
    .fetch_all(executor)
    .await?;
    Ok(requests)
}

/// Requests of one user, newest first, with names joined in
pub async fn find_detail_by_user<'e, E>(
    executor: E,
    user_id: &str,
) -> RepoResult<Vec<ParkingRequestDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let requests = sqlx::query_as::<_, ParkingRequestDetail>(&format!(
        "{SELECT_DETAIL} WHERE r.user_id = ? ORDER BY r.created_at DESC, r.rowid DESC"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await?;
    Ok(requests)
}

/// `(status, count)` for every status that has at least one request
pub async fn count_by_status<'e, E>(executor: E) -> RepoResult<Vec<(RequestStatus, i64)>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let counts = sqlx::query_as::<_, (RequestStatus, i64)>(
        "SELECT status, COUNT(*) FROM parking_requests GROUP BY status",
    )
    .fetch_all(executor)
    .await?;
    Ok(counts)
}
