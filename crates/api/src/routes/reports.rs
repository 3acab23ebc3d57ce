//! Route definitions for reporting.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /package-consumption  -> consumption report (?client_id=&from=&to=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/package-consumption", get(reports::package_consumption))
}
