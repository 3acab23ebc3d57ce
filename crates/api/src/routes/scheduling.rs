//! Route definitions for smart scheduling.

use axum::routing::get;
use axum::Router;

use crate::handlers::scheduling;
use crate::state::AppState;

/// Routes mounted at `/scheduling`.
///
/// ```text
/// GET /suggestions  -> free-slot suggestions (?client_id=&date=&duration_minutes=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/suggestions", get(scheduling::suggestions))
}
