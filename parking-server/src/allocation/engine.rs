//! Allocation engine: request submission and admin decisions

use chrono::Utc;
use shared::error::AppError;
use shared::models::{
    DurationType, ParkingRequest, ParkingRequestCreate, RequestStatus, User, UserCreate,
};
use sqlx::SqlitePool;

use super::{AllocationError, AllocationResult, ledger, lifecycle, office_policy};
use crate::db::repository::parking_request::DecisionUpdate;
use crate::db::repository::{RepoError, parking_request, user};
use crate::security_log;
use crate::utils::time::{optional_date, require_date, validate_date_order};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email,
    validate_optional_text, validate_required_text,
};

/// Submits parking requests and applies admin decisions
///
/// Slot counters change only in [`AllocationEngine::decide`]; submission
/// reads availability to choose between `pending` and `waitlist`.
#[derive(Clone, Debug)]
pub struct AllocationEngine {
    pool: SqlitePool,
}

impl AllocationEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Validate and store a new request
    ///
    /// The employee is created on first sight of their `emp_id`; later
    /// submissions reuse the stored user untouched.
    pub async fn submit(&self, input: ParkingRequestCreate) -> AllocationResult<ParkingRequest> {
        validate_submission(&input).map_err(AllocationError::Validation)?;

        let office = office_policy::resolve_office(&self.pool, input.office_id.as_deref()).await?;
        let user = self.find_or_create_user(&input).await?;
        let status = lifecycle::initial_status(office.available_slots(input.vehicle_type));

        let now = Utc::now();
        let request = ParkingRequest {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user.id,
            office_id: office.id,
            vehicle_type: input.vehicle_type,
            vehicle_number: input.vehicle_number.trim().to_string(),
            duration_type: input.duration_type,
            parking_date: non_blank(input.parking_date),
            start_date: non_blank(input.start_date),
            end_date: non_blank(input.end_date),
            recurring_pattern: non_blank(input.recurring_pattern),
            description: non_blank(input.description),
            status,
            slot_number: None,
            approved_by: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };

        let created = parking_request::insert(&self.pool, &request).await?;
        tracing::info!(
            request_id = %created.id,
            emp_id = %input.emp_id,
            office_id = %created.office_id,
            vehicle_type = created.vehicle_type.as_str(),
            status = %created.status,
            "Parking request submitted"
        );
        Ok(created)
    }

    /// Approve or reject a request
    ///
    /// Approval takes a slot and records it on the request in one
    /// transaction. Both writes are guarded: the slot counter by
    /// `available > 0`, the request by the status read before the
    /// transaction, so a concurrent decision on the same request fails
    /// with [`AllocationError::InvalidTransition`] and the slot is returned.
    pub async fn decide(
        &self,
        request_id: &str,
        status: RequestStatus,
        rejection_reason: Option<&str>,
        approved_by: &str,
    ) -> AllocationResult<ParkingRequest> {
        let request = parking_request::find_by_id(&self.pool, request_id)
            .await?
            .ok_or_else(|| AllocationError::RequestNotFound(request_id.to_string()))?;

        lifecycle::check_transition(request.status, status)?;

        let decided = match status {
            RequestStatus::Approved => self.approve(&request, approved_by).await?,
            RequestStatus::Rejected => {
                let reason = rejection_reason.map(str::trim).unwrap_or_default();
                validate_required_text(reason, "rejection_reason", MAX_NOTE_LEN)
                    .map_err(AllocationError::Validation)?;
                self.reject(&request, reason).await?
            }
            // check_transition only lets terminal targets through
            RequestStatus::Pending | RequestStatus::Waitlist => {
                return Err(AllocationError::InvalidTransition {
                    from: request.status,
                    to: status,
                });
            }
        };

        security_log!(
            INFO,
            "request_decided",
            request_id = %decided.id,
            status = decided.status.as_str(),
            slot_number = ?decided.slot_number,
            decided_by = approved_by
        );
        Ok(decided)
    }

    async fn approve(
        &self,
        request: &ParkingRequest,
        approved_by: &str,
    ) -> AllocationResult<ParkingRequest> {
        let mut tx = self.pool.begin().await?;

        let slot = ledger::take_slot(&mut *tx, &request.office_id, request.vehicle_type).await?;

        let update = DecisionUpdate {
            status: RequestStatus::Approved,
            slot_number: Some(&slot),
            approved_by: Some(approved_by),
            rejection_reason: None,
            updated_at: Utc::now(),
        };
        let updated =
            parking_request::update_decision(&mut *tx, &request.id, request.status, &update)
                .await?;

        match updated {
            Some(updated) => {
                tx.commit().await?;
                Ok(updated)
            }
            None => {
                tx.rollback().await?;
                Err(self.lost_race(request, RequestStatus::Approved).await?)
            }
        }
    }

    async fn reject(
        &self,
        request: &ParkingRequest,
        reason: &str,
    ) -> AllocationResult<ParkingRequest> {
        let update = DecisionUpdate {
            status: RequestStatus::Rejected,
            slot_number: None,
            approved_by: None,
            rejection_reason: Some(reason),
            updated_at: Utc::now(),
        };
        match parking_request::update_decision(&self.pool, &request.id, request.status, &update)
            .await?
        {
            Some(updated) => Ok(updated),
            None => Err(self.lost_race(request, RequestStatus::Rejected).await?),
        }
    }

    /// Error for a decision whose status guard failed
    async fn lost_race(
        &self,
        request: &ParkingRequest,
        to: RequestStatus,
    ) -> AllocationResult<AllocationError> {
        let current = parking_request::find_by_id(&self.pool, &request.id)
            .await?
            .map(|r| r.status)
            .unwrap_or(request.status);
        tracing::warn!(
            request_id = %request.id,
            observed = %request.status,
            current = %current,
            "Request changed while being decided"
        );
        Ok(AllocationError::InvalidTransition { from: current, to })
    }

    async fn find_or_create_user(&self, input: &ParkingRequestCreate) -> AllocationResult<User> {
        let emp_id = input.emp_id.trim();
        if let Some(existing) = user::find_by_emp_id(&self.pool, emp_id).await? {
            return Ok(existing);
        }

        let data = UserCreate {
            emp_id: emp_id.to_string(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            team: non_blank(input.team.clone()),
            shift: non_blank(input.shift.clone()),
        };
        match user::create(&self.pool, &data).await {
            Ok(created) => {
                tracing::info!(user_id = %created.id, emp_id = %created.emp_id, "User created");
                Ok(created)
            }
            // Lost a race with a concurrent first submission of the same emp_id
            Err(RepoError::Duplicate(_)) => user::find_by_emp_id(&self.pool, emp_id)
                .await?
                .ok_or_else(|| AllocationError::UserNotFound(emp_id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Field and date checks for a submission
pub fn validate_submission(input: &ParkingRequestCreate) -> Result<(), AppError> {
    validate_required_text(&input.emp_id, "emp_id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
    validate_email(&input.email, "email")?;
    validate_required_text(&input.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&input.vehicle_number, "vehicle_number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&input.team, "team", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&input.shift, "shift", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&input.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&input.recurring_pattern, "recurring_pattern", MAX_SHORT_TEXT_LEN)?;

    match input.duration_type {
        DurationType::SingleDay => {
            require_date(input.parking_date.as_deref(), "parking_date")?;
        }
        DurationType::DateRange => {
            let start = require_date(input.start_date.as_deref(), "start_date")?;
            let end = require_date(input.end_date.as_deref(), "end_date")?;
            validate_date_order(start, end)?;
        }
        DurationType::Recurring => {
            let pattern = input.recurring_pattern.as_deref().unwrap_or_default();
            validate_required_text(pattern, "recurring_pattern", MAX_SHORT_TEXT_LEN)?;
            let start = optional_date(input.start_date.as_deref(), "start_date")?;
            let end = optional_date(input.end_date.as_deref(), "end_date")?;
            if let (Some(start), Some(end)) = (start, end) {
                validate_date_order(start, end)?;
            }
        }
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
