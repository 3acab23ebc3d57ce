//! Payment entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full payment row from the `payments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Payment {
    pub id: DbId,
    pub appointment_id: DbId,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert values for a payment. Payments are only created by the
/// appointment-completion flow, never directly by API callers.
#[derive(Debug)]
pub struct CreatePayment {
    pub appointment_id: DbId,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub description: Option<String>,
}
