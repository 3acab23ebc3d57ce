//! Route definitions for `/clients`, including per-client package sales.

use axum::routing::get;
use axum::Router;

use crate::handlers::{client_packages, clients};
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /                        -> list (?limit=&sort=asc|desc)
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete (cascades owned children)
/// GET    /{client_id}/packages    -> list the client's purchases
/// POST   /{client_id}/packages    -> sell a package to the client
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list).post(clients::create))
        .route(
            "/{id}",
            get(clients::get_by_id)
                .put(clients::update)
                .delete(clients::delete),
        )
        .route(
            "/{client_id}/packages",
            get(client_packages::list_by_client).post(client_packages::sell),
        )
}
