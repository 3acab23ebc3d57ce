//! Row types for the package-consumption report.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One completed session counted against a purchase.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConsumptionUsage {
    pub used_at: Timestamp,
    pub service_name: String,
}

/// Purchase row joined with client/package names, as selected by the report
/// query before the usage list is attached.
#[derive(Debug, Clone, FromRow)]
pub struct ConsumptionPurchase {
    pub id: DbId,
    pub client_id: DbId,
    pub package_id: DbId,
    pub client_name: String,
    pub package_name: String,
    pub purchased_at: Timestamp,
    pub expires_at: Timestamp,
    pub session_count: i32,
    pub remaining_sessions: i32,
    pub status: String,
}

/// One report row per package purchase.
#[derive(Debug, Serialize)]
pub struct ConsumptionReportRow {
    pub client_name: String,
    pub package_name: String,
    pub purchased_at: Timestamp,
    pub expires_at: Timestamp,
    pub total_sessions: i32,
    pub remaining_sessions: i32,
    pub status: String,
    pub usage: Vec<ConsumptionUsage>,
}
