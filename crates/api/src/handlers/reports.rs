//! Handler for the package-consumption report.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use atelier_core::types::DbId;
use atelier_db::models::report::ConsumptionReportRow;
use atelier_db::repositories::report_repo::ConsumptionFilters;
use atelier_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /reports/package-consumption`.
///
/// `from` and `to` filter on the purchase date; `to` is inclusive of the
/// whole named day.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub client_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/v1/reports/package-consumption
pub async fn package_consumption(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<Vec<ConsumptionReportRow>>> {
    let filters = ConsumptionFilters {
        client_id: params.client_id,
        purchased_from: params.from.map(start_of_day),
        purchased_before: params.to.map(|d| start_of_day(d) + Duration::days(1)),
    };

    let rows = ReportRepo::consumption(&state.pool, &filters).await?;
    Ok(Json(rows))
}

fn start_of_day(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
}
