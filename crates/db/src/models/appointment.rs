//! Appointment entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::payment::Payment;

/// Full appointment row from the `appointments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Appointment {
    pub id: DbId,
    pub client_id: DbId,
    pub service_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new appointment. Status defaults to `confirmed`.
#[derive(Debug, Deserialize)]
pub struct CreateAppointment {
    pub client_id: DbId,
    pub service_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating an existing appointment. All fields are optional.
///
/// Setting status to `completed` is rejected by the update handler; the
/// completion endpoint is the only path to that state.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAppointment {
    pub client_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Outcome of a successful appointment completion.
#[derive(Debug, Serialize)]
pub struct CompletionResult {
    pub appointment: Appointment,
    /// The purchase a session was debited from, when one covered the service.
    pub consumed_package_id: Option<DbId>,
    pub payment: Payment,
}
