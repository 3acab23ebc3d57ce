//! Repository for the `appointments` table, including the completion flow.

use atelier_core::status::{payment, purchase};
use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::appointment::{
    Appointment, CompletionResult, CreateAppointment, UpdateAppointment,
};
use crate::models::payment::Payment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, client_id, service_id, starts_at, ends_at, status, notes, created_at, updated_at";

/// Payment column list, for rows created inside the completion transaction.
const PAYMENT_COLUMNS: &str =
    "id, appointment_id, amount, method, status, description, created_at, updated_at";

/// Provides CRUD operations and the completion transaction for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert a new appointment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments (client_id, service_id, starts_at, ends_at, status, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'confirmed'), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(input.client_id)
            .bind(input.service_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an appointment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all appointments, newest start first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments ORDER BY starts_at DESC");
        sqlx::query_as::<_, Appointment>(&query)
            .fetch_all(pool)
            .await
    }

    /// List appointments whose start falls in `[from, to)`, earliest first.
    /// Feeds the busy-interval list for slot suggestions.
    pub async fn list_starting_between(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments
             WHERE starts_at >= $1 AND starts_at < $2
             ORDER BY starts_at"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Update an appointment. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. The handler is
    /// responsible for refusing status transitions into `completed`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                client_id = COALESCE($2, client_id),
                service_id = COALESCE($3, service_id),
                starts_at = COALESCE($4, starts_at),
                ends_at = COALESCE($5, ends_at),
                status = COALESCE($6, status),
                notes = COALESCE($7, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(input.service_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an appointment. Payments cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Complete an appointment in one transaction: debit the soonest-expiring
    /// eligible package purchase (creating a zero-amount paid payment), or
    /// fall back to a pending full-price charge, then flip the appointment
    /// to `completed`.
    ///
    /// Returns `Ok(None)` when the appointment does not exist or is already
    /// completed -- the row is locked with its status checked inside the
    /// transaction, so two racing completions cannot both debit a session.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<CompletionResult>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the appointment row; skip rows already completed.
        let target: Option<(DbId, DbId, f64, String)> = sqlx::query_as(
            "SELECT a.client_id, a.service_id, s.price, s.name
             FROM appointments a
             JOIN services s ON s.id = a.service_id
             WHERE a.id = $1 AND a.status <> 'completed'
             FOR UPDATE OF a",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((client_id, service_id, service_price, service_name)) = target else {
            return Ok(None);
        };

        // Pick the eligible purchase closest to expiry: active, unexpired,
        // with balance, covering this service. Locked so the decrement below
        // cannot race a concurrent completion.
        let eligible: Option<(DbId, i32, String)> = sqlx::query_as(
            "SELECT cp.id, cp.remaining_sessions, p.name
             FROM client_packages cp
             JOIN packages p ON p.id = cp.package_id
             JOIN package_services ps
               ON ps.package_id = cp.package_id AND ps.service_id = $2
             WHERE cp.client_id = $1
               AND cp.status = 'active'
               AND cp.remaining_sessions > 0
               AND cp.expires_at >= NOW()
             ORDER BY cp.expires_at ASC
             LIMIT 1
             FOR UPDATE OF cp",
        )
        .bind(client_id)
        .bind(service_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (consumed_package_id, payment) = match eligible {
            Some((purchase_id, remaining, package_name)) => {
                let new_balance = remaining - 1;
                let new_status = if new_balance == 0 {
                    purchase::EXHAUSTED
                } else {
                    purchase::ACTIVE
                };
                sqlx::query(
                    "UPDATE client_packages SET remaining_sessions = $2, status = $3 WHERE id = $1",
                )
                .bind(purchase_id)
                .bind(new_balance)
                .bind(new_status)
                .execute(&mut *tx)
                .await?;

                let payment = Self::insert_payment(
                    &mut tx,
                    id,
                    0.0,
                    payment::METHOD_PACKAGE,
                    payment::PAID,
                    &format!("Covered by package '{package_name}'"),
                )
                .await?;
                (Some(purchase_id), payment)
            }
            None => {
                let payment = Self::insert_payment(
                    &mut tx,
                    id,
                    service_price,
                    payment::METHOD_PIX,
                    payment::PENDING,
                    &format!("Charge for service: {service_name}"),
                )
                .await?;
                (None, payment)
            }
        };

        let query = format!(
            "UPDATE appointments SET status = 'completed' WHERE id = $1 RETURNING {COLUMNS}"
        );
        let appointment = sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(CompletionResult {
            appointment,
            consumed_package_id,
            payment,
        }))
    }

    async fn insert_payment(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        appointment_id: DbId,
        amount: f64,
        method: &str,
        status: &str,
        description: &str,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (appointment_id, amount, method, status, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PAYMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(appointment_id)
            .bind(amount)
            .bind(method)
            .bind(status)
            .bind(description)
            .fetch_one(&mut **tx)
            .await
    }
}
