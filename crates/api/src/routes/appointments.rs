//! Route definitions for the `/appointments` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET    /                -> list (newest start first)
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (cannot set status to completed)
/// DELETE /{id}            -> delete (payments cascade)
/// PATCH  /{id}/complete   -> complete (debits a package or creates a charge)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointments::list).post(appointments::create))
        .route(
            "/{id}",
            get(appointments::get_by_id)
                .put(appointments::update)
                .delete(appointments::delete),
        )
        .route("/{id}/complete", patch(appointments::complete))
}
