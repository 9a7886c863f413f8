//! Admin dashboard DTOs

use serde::{Deserialize, Serialize};

use super::RequestStatus;

/// Number of requests per status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub waitlist: i64,
}

impl RequestCounts {
    /// Add `count` requests of `status`
    pub fn add(&mut self, status: RequestStatus, count: i64) {
        match status {
            RequestStatus::Pending => self.pending += count,
            RequestStatus::Approved => self.approved += count,
            RequestStatus::Rejected => self.rejected += count,
            RequestStatus::Waitlist => self.waitlist += count,
        }
    }

    pub fn total(&self) -> i64 {
        self.pending + self.approved + self.rejected + self.waitlist
    }
}

/// Per-office utilization line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfficeStats {
    pub office_name: String,
    /// Percent of car slots taken, one decimal
    pub car_utilization: f64,
    /// Percent of bike slots taken, one decimal
    pub bike_utilization: f64,
    pub available_car_slots: i64,
    pub available_bike_slots: i64,
}

/// `GET /api/admin/dashboard` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub request_counts: RequestCounts,
    pub office_stats: Vec<OfficeStats>,
}
