//! Slot allocation and request lifecycle
//!
//! - [`AllocationEngine`] - submit / decide
//! - [`lifecycle`] - allowed status transitions
//! - [`ledger`] - per-office slot counters
//! - [`office_policy`] - target office resolution and bootstrap
//!
//! # Error mapping
//!
//! | Error | ErrorCode | HTTP |
//! |-------|-----------|------|
//! | Validation | ValidationFailed | 400 |
//! | OfficeNotFound / RequestNotFound / UserNotFound | 4001 / 4002 / 4003 | 404 |
//! | CapacityExceeded | SlotCapacityExceeded | 409 |
//! | InvalidTransition | InvalidStatusTransition | 409 |
//! | Repo | DatabaseError | 500 |

mod engine;
pub mod ledger;
pub mod lifecycle;
pub mod office_policy;


pub use engine::AllocationEngine;

use shared::error::{AppError, ErrorCode};
use shared::models::{RequestStatus, VehicleType};
use thiserror::Error;

use crate::db::repository::RepoError;

/// Allocation errors
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("{0}")]
    Validation(AppError),

    #[error("Office not found: {0}")]
    OfficeNotFound(String),

    #[error("Request not found: {0}")]
    RequestNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("No {vehicle_type:?} slots available in office {office_id}")]
    CapacityExceeded {
        office_id: String,
        vehicle_type: VehicleType,
    },

    #[error("Cannot move request from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for AllocationError {
    fn from(err: sqlx::Error) -> Self {
        AllocationError::Repo(err.into())
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::Validation(e) => e,
            AllocationError::OfficeNotFound(id) => {
                AppError::new(ErrorCode::OfficeNotFound).with_detail("office_id", id)
            }
            AllocationError::RequestNotFound(id) => {
                AppError::new(ErrorCode::ParkingRequestNotFound).with_detail("request_id", id)
            }
            AllocationError::UserNotFound(emp_id) => {
                AppError::new(ErrorCode::UserNotFound).with_detail("emp_id", emp_id)
            }
            AllocationError::CapacityExceeded {
                office_id,
                vehicle_type,
            } => AppError::with_message(
                ErrorCode::SlotCapacityExceeded,
                format!("No {} parking slots available", vehicle_type.as_str()),
            )
            .with_detail("office_id", office_id)
            .with_detail("vehicle_type", vehicle_type.as_str()),
            AllocationError::InvalidTransition { from, to } => AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move request from {from} to {to}"),
            )
            .with_detail("from", from.as_str())
            .with_detail("to", to.as_str()),
            AllocationError::Repo(e) => e.into(),
        }
    }
}

pub type AllocationResult<T> = Result<T, AllocationError>;
