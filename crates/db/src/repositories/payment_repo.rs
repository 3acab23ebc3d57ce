//! Repository for the `payments` table.
//!
//! Payments are written by the appointment-completion transaction in
//! `AppointmentRepo::complete`; this repository only reads them back.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::Payment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, appointment_id, amount, method, status, description, \
                       created_at, updated_at";

/// Provides read operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// List the payments recorded for an appointment, oldest first.
    pub async fn list_by_appointment(
        pool: &PgPool,
        appointment_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE appointment_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(appointment_id)
            .fetch_all(pool)
            .await
    }
}
