//! Route definitions for the `/packages` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::packages;
use crate::state::AppState;

/// Routes mounted at `/packages`.
///
/// ```text
/// GET    /       -> list (with covered services)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (service_ids replaces the covered set)
/// DELETE /{id}   -> delete (cascades purchases)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(packages::list).post(packages::create))
        .route(
            "/{id}",
            get(packages::get_by_id)
                .put(packages::update)
                .delete(packages::delete),
        )
}
