//! Request lifecycle state machine
//!
//! ```text
//! pending  ──┬──> approved
//! waitlist ──┘└─> rejected
//! ```
//!
//! `approved` and `rejected` are terminal; nothing moves back into
//! `pending` or `waitlist`.

use shared::models::RequestStatus;

use super::{AllocationError, AllocationResult};

/// Status of a freshly submitted request given the slots left for its
/// vehicle type
pub fn initial_status(available: i64) -> RequestStatus {
    if available > 0 {
        RequestStatus::Pending
    } else {
        RequestStatus::Waitlist
    }
}

pub fn is_terminal(status: RequestStatus) -> bool {
    matches!(status, RequestStatus::Approved | RequestStatus::Rejected)
}

/// Only open requests move, and only into a terminal status
pub fn can_transition(from: RequestStatus, to: RequestStatus) -> bool {
    !is_terminal(from) && is_terminal(to)
}

pub fn check_transition(from: RequestStatus, to: RequestStatus) -> AllocationResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(AllocationError::InvalidTransition { from, to })
    }
}
