//! Admin dashboard aggregation
//!
//! [`summarize`] is a pure function of the per-status counts and the
//! offices; [`load`] reads both from the store.

use shared::models::{DashboardSummary, Office, OfficeStats, RequestCounts, RequestStatus};
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, office, parking_request};

/// Percent of `total` slots taken, one decimal; 0 when there are no slots
pub fn utilization(total: i64, available: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let used = (total - available) as f64 / total as f64 * 100.0;
    (used * 10.0).round() / 10.0
}

pub fn office_stats(office: &Office) -> OfficeStats {
    OfficeStats {
        office_name: office.name.clone(),
        car_utilization: utilization(office.total_car_slots, office.available_car_slots),
        bike_utilization: utilization(office.total_bike_slots, office.available_bike_slots),
        available_car_slots: office.available_car_slots,
        available_bike_slots: office.available_bike_slots,
    }
}

pub fn summarize(counts: &[(RequestStatus, i64)], offices: &[Office]) -> DashboardSummary {
    let mut request_counts = RequestCounts::default();
    for (status, count) in counts {
        request_counts.add(*status, *count);
    }

    DashboardSummary {
        request_counts,
        office_stats: offices.iter().map(office_stats).collect(),
    }
}

pub async fn load(pool: &SqlitePool) -> RepoResult<DashboardSummary> {
    let counts = parking_request::count_by_status(pool).await?;
    let offices = office::find_all(pool).await?;
    Ok(summarize(&counts, &offices))
}
