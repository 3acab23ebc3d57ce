//! Handlers for the dashboard endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use atelier_db::models::dashboard::{DashboardStats, UpcomingAppointment};
use atelier_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Default number of upcoming appointments returned.
const DEFAULT_UPCOMING_LIMIT: i64 = 5;

/// Query parameters for `GET /dashboard/upcoming`.
#[derive(Debug, Deserialize)]
pub struct UpcomingParams {
    pub limit: Option<i64>,
}

/// GET /api/v1/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/v1/dashboard/upcoming
///
/// Next confirmed appointments from now on, soonest first.
pub async fn upcoming(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<UpcomingParams>,
) -> AppResult<Json<Vec<UpcomingAppointment>>> {
    let limit = params.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT).clamp(1, 50);
    let upcoming = DashboardRepo::upcoming(&state.pool, limit).await?;
    Ok(Json(upcoming))
}
