//! Handlers for the `/appointments` resource, including completion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_core::error::CoreError;
use atelier_core::status::appointment as appointment_status;
use atelier_core::types::DbId;
use atelier_core::validation::{validate_notes, validate_time_window};
use atelier_db::models::appointment::{Appointment, CreateAppointment, UpdateAppointment};
use atelier_db::repositories::AppointmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/appointments
///
/// Status defaults to `confirmed`. Creating an appointment directly in the
/// `completed` state is refused; completion has its own endpoint so the
/// payment/package side effects always run.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateAppointment>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    validate_time_window(input.starts_at, input.ends_at)?;
    if let Some(status) = &input.status {
        validate_settable_status(status)?;
    }
    if let Some(notes) = &input.notes {
        validate_notes(notes)?;
    }

    let appointment = AppointmentRepo::create(&state.pool, &input).await?;
    tracing::info!(appointment_id = %appointment.id, "Appointment created");
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// GET /api/v1/appointments
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Appointment>>> {
    let appointments = AppointmentRepo::list(&state.pool).await?;
    Ok(Json(appointments))
}

/// GET /api/v1/appointments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Appointment>> {
    let appointment = AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(appointment))
}

/// PUT /api/v1/appointments/{id}
///
/// Partial update. The merged time window must stay valid, and the status
/// cannot be moved to `completed` here.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppointment>,
) -> AppResult<Json<Appointment>> {
    if let Some(status) = &input.status {
        validate_settable_status(status)?;
    }
    if let Some(notes) = &input.notes {
        validate_notes(notes)?;
    }

    if input.starts_at.is_some() || input.ends_at.is_some() {
        let existing = AppointmentRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(not_found(id))?;
        let starts_at = input.starts_at.unwrap_or(existing.starts_at);
        let ends_at = input.ends_at.unwrap_or(existing.ends_at);
        validate_time_window(starts_at, ends_at)?;
    }

    let appointment = AppointmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(appointment))
}

/// PATCH /api/v1/appointments/{id}/complete
///
/// Mark an appointment as fulfilled. Debits the soonest-expiring covering
/// package purchase or records a pending full-price charge; completing an
/// already-completed appointment is a conflict.
pub async fn complete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Appointment>> {
    let existing = AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    if existing.status == appointment_status::COMPLETED {
        return Err(already_completed());
    }

    // The transaction re-checks the status under a row lock; a concurrent
    // completion landing between the read above and here surfaces as None.
    let result = AppointmentRepo::complete(&state.pool, id)
        .await?
        .ok_or_else(already_completed)?;

    tracing::info!(
        appointment_id = %id,
        consumed_package_id = ?result.consumed_package_id,
        payment_method = %result.payment.method,
        "Appointment completed"
    );
    Ok(Json(result.appointment))
}

/// DELETE /api/v1/appointments/{id}
///
/// Hard delete. The appointment's payments cascade.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AppointmentRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(appointment_id = %id, "Appointment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Appointment",
        id,
    })
}

fn already_completed() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Appointment is already completed".into(),
    ))
}

/// Accept only known statuses, and never `completed` -- that transition is
/// reserved for the completion endpoint.
fn validate_settable_status(status: &str) -> AppResult<()> {
    if !appointment_status::is_valid(status) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "status must be one of {:?}",
            appointment_status::ALL
        ))));
    }
    if status == appointment_status::COMPLETED {
        return Err(AppError::Core(CoreError::Validation(
            "Use PATCH /appointments/{id}/complete to complete an appointment".into(),
        )));
    }
    Ok(())
}
