//! Slot ledger
//!
//! Per-office counters of free car and bike slots. Counters only move
//! through [`take_slot`], called inside the approval transaction.

use shared::models::VehicleType;
use sqlx::SqliteConnection;

use super::{AllocationError, AllocationResult};
use crate::db::repository::office;

/// Slot number handed out when `available_after` slots remain of `total`
///
/// Slots are numbered from 1 in approval order: `C-1`, `C-2`, ...
pub fn slot_number(vehicle_type: VehicleType, total: i64, available_after: i64) -> String {
    format!("{}-{}", vehicle_type.slot_prefix(), total - available_after)
}

/// Take one slot of `vehicle_type` from `office_id`
///
/// Must be the first statement of its transaction so the write lock is
/// taken before anything is read.
pub async fn take_slot(
    conn: &mut SqliteConnection,
    office_id: &str,
    vehicle_type: VehicleType,
) -> AllocationResult<String> {
    match office::decrement_available(&mut *conn, office_id, vehicle_type).await? {
        Some((total, available_after)) => Ok(slot_number(vehicle_type, total, available_after)),
        None => {
            if office::find_by_id(&mut *conn, office_id).await?.is_none() {
                return Err(AllocationError::OfficeNotFound(office_id.to_string()));
            }
            Err(AllocationError::CapacityExceeded {
                office_id: office_id.to_string(),
                vehicle_type,
            })
        }
    }
}
