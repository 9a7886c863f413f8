//! Parking Request Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Vehicle type, one slot pool per type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum VehicleType {
    Car,
    Bike,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
        }
    }

    /// Slot number prefix: `C-n` for cars, `B-n` for bikes
    pub fn slot_prefix(&self) -> &'static str {
        match self {
            Self::Car => "C",
            Self::Bike => "B",
        }
    }
}

/// How long the parking is requested for
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum DurationType {
    /// One day, `parking_date`
    #[default]
    SingleDay,
    /// `start_date..=end_date`
    DateRange,
    /// Free-form `recurring_pattern` (e.g. "Mon,Wed,Fri")
    Recurring,
}

/// Request status
///
/// `pending`/`waitlist` are the initial states, `approved`/`rejected` terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Waitlist,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Waitlist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Waitlist => "waitlist",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown request status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Parking request entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ParkingRequest {
    pub id: String,
    pub user_id: String,
    pub office_id: String,
    pub vehicle_type: VehicleType,
    pub vehicle_number: String,
    pub duration_type: DurationType,
    pub parking_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub recurring_pattern: Option<String>,
    pub description: Option<String>,
    pub status: RequestStatus,
    /// Set only once approved
    pub slot_number: Option<String>,
    pub approved_by: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submit payload: employee details plus the request itself
///
/// The employee fields only matter the first time an `emp_id` is seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingRequestCreate {
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
    /// Falls back to the default office when absent or unknown
    #[serde(default)]
    pub office_id: Option<String>,
    pub vehicle_type: VehicleType,
    pub vehicle_number: String,
    #[serde(default)]
    pub duration_type: DurationType,
    #[serde(default)]
    pub parking_date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub recurring_pattern: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Admin decision payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDecision {
    pub request_id: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// Parking request joined with its user and office names
///
/// Names fall back to `"Unknown"` when the referenced row is gone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ParkingRequestDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub request: ParkingRequest,
    pub user_name: String,
    pub user_email: String,
    pub office_name: String,
}
