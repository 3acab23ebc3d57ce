//! Aggregate types for the dashboard endpoints.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Headline counters shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_clients: i64,
    pub clients_this_month: i64,
    pub active_services: i64,
    pub appointments_today: i64,
    /// Sum of `paid` payments created this month.
    pub revenue_this_month: f64,
}

/// A confirmed future appointment, joined with display names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UpcomingAppointment {
    pub id: DbId,
    pub client_name: String,
    pub service_name: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}
