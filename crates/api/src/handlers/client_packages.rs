//! Handlers for selling packages to clients and listing their purchases.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::client_package::{
    ClientPackage, ClientPackageSummary, CreateClientPackage, SellPackage,
};
use atelier_db::repositories::{ClientPackageRepo, ClientRepo, PackageRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/clients/{client_id}/packages
///
/// Sell a package to a client. The session balance comes from the package's
/// session count and the expiry from its validity window; neither can be
/// supplied by the caller.
pub async fn sell(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(client_id): Path<DbId>,
    Json(input): Json<SellPackage>,
) -> AppResult<(StatusCode, Json<ClientPackage>)> {
    ClientRepo::find_by_id(&state.pool, client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: client_id,
        }))?;

    let package = PackageRepo::find_by_id(&state.pool, input.package_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Package",
            id: input.package_id,
        }))?;

    let purchase = ClientPackageRepo::create(
        &state.pool,
        &CreateClientPackage {
            client_id,
            package_id: package.id,
            expires_at: Utc::now() + Duration::days(i64::from(package.validity_days)),
            remaining_sessions: package.session_count,
        },
    )
    .await?;

    tracing::info!(
        purchase_id = %purchase.id,
        client_id = %client_id,
        package_id = %package.id,
        "Package sold"
    );
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// GET /api/v1/clients/{client_id}/packages
///
/// List a client's purchases, newest first.
pub async fn list_by_client(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(client_id): Path<DbId>,
) -> AppResult<Json<Vec<ClientPackageSummary>>> {
    ClientRepo::find_by_id(&state.pool, client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: client_id,
        }))?;

    let purchases = ClientPackageRepo::list_by_client(&state.pool, client_id).await?;
    Ok(Json(purchases))
}
