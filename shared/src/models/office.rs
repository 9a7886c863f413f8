//! Office Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VehicleType;

/// Office entity (an office site with car and bike parking)
///
/// `available_*` never leaves `0..=total_*`; only approvals move it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Office {
    pub id: String,
    pub name: String,
    pub location: String,
    pub total_car_slots: i64,
    pub total_bike_slots: i64,
    pub available_car_slots: i64,
    pub available_bike_slots: i64,
    pub created_at: DateTime<Utc>,
}

impl Office {
    /// Currently available slots for a vehicle type
    pub fn available_slots(&self, vehicle: VehicleType) -> i64 {
        match vehicle {
            VehicleType::Car => self.available_car_slots,
            VehicleType::Bike => self.available_bike_slots,
        }
    }
}

/// Create office payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeCreate {
    pub name: String,
    pub location: String,
    pub total_car_slots: i64,
    pub total_bike_slots: i64,
}
