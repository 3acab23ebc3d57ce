//! Handler for smart-scheduling slot suggestions.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::error::CoreError;
use atelier_core::scheduling::free_slots;
use atelier_core::types::{DbId, Timestamp};
use atelier_db::repositories::{AppointmentRepo, ClientRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /scheduling/suggestions`.
#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    pub client_id: DbId,
    /// Calendar date to scan (`YYYY-MM-DD`).
    pub date: NaiveDate,
    pub duration_minutes: i64,
}

/// Suggested free start times for the requested date and duration.
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Timestamp>,
    pub duration_minutes: i64,
}

/// GET /api/v1/scheduling/suggestions
///
/// Scans the day's bookings for free start times on the half-hour grid.
/// Answers the `ERRO-AGENDA004` domain error when nothing fits.
pub async fn suggestions(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<SuggestionParams>,
) -> AppResult<Json<SuggestionsResponse>> {
    if params.duration_minutes < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "duration_minutes must be at least 1".into(),
        )));
    }

    ClientRepo::find_by_id(&state.pool, params.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: params.client_id,
        }))?;

    let day_start = Utc.from_utc_datetime(
        &params
            .date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid"),
    );
    let day_end = day_start + Duration::days(1);

    let bookings =
        AppointmentRepo::list_starting_between(&state.pool, day_start, day_end).await?;
    let busy: Vec<_> = bookings.iter().map(|a| (a.starts_at, a.ends_at)).collect();

    let suggestions = free_slots(params.date, params.duration_minutes, &busy);
    if suggestions.is_empty() {
        return Err(AppError::NoFreeSlots);
    }

    Ok(Json(SuggestionsResponse {
        suggestions,
        duration_minutes: params.duration_minutes,
    }))
}
