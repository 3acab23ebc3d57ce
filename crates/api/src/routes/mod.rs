pub mod appointments;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod packages;
pub mod reports;
pub mod scheduling;
pub mod services;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public, rate-limited)
/// /auth/register                       register (public)
/// /auth/refresh                        refresh token exchange (public)
/// /auth/me                             current user (requires auth)
///
/// /clients                             list, create
/// /clients/{id}                        get, update, delete
/// /clients/{client_id}/packages        list purchases, sell package
///
/// /services                            list, create
/// /services/{id}                       get, update, delete
///
/// /packages                            list, create
/// /packages/{id}                       get, update, delete
///
/// /appointments                        list, create
/// /appointments/{id}                   get, update, delete
/// /appointments/{id}/complete          complete (PATCH)
///
/// /scheduling/suggestions              free-slot suggestions (GET)
///
/// /reports/package-consumption         consumption report (GET)
///
/// /dashboard/stats                     headline counters (GET)
/// /dashboard/upcoming                  next confirmed appointments (GET)
/// ```
///
/// Everything except the public `/auth` endpoints requires a Bearer access
/// token, enforced per-handler via the `AuthUser` extractor.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (login, register, refresh, me).
        .nest("/auth", auth::router())
        // Client records and their package purchases.
        .nest("/clients", clients::router())
        // Service catalog.
        .nest("/services", services::router())
        // Prepaid service packages.
        .nest("/packages", packages::router())
        // Bookings and the completion flow.
        .nest("/appointments", appointments::router())
        // Smart scheduling suggestions.
        .nest("/scheduling", scheduling::router())
        // Consumption reporting.
        .nest("/reports", reports::router())
        // Dashboard widgets.
        .nest("/dashboard", dashboard::router())
}
