//! Handlers for the `/packages` resource.
//!
//! Package responses embed the covered services; create and update accept a
//! `service_ids` list that must reference existing services.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_core::validation::{validate_name, validate_positive, validate_price};
use atelier_db::models::package::{CreatePackage, Package, PackageWithServices, UpdatePackage};
use atelier_db::repositories::{PackageRepo, ServiceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/packages
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreatePackage>,
) -> AppResult<(StatusCode, Json<PackageWithServices>)> {
    validate_name("name", &input.name)?;
    validate_price("price", input.price)?;
    validate_positive("session_count", input.session_count)?;
    validate_positive("validity_days", input.validity_days)?;
    ensure_services_exist(&state, &input.service_ids).await?;

    let package = PackageRepo::create(&state.pool, &input).await?;
    tracing::info!(package_id = %package.id, "Package created");

    let with_services = attach_services(&state, package).await?;
    Ok((StatusCode::CREATED, Json(with_services)))
}

/// GET /api/v1/packages
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<PackageWithServices>>> {
    let packages = PackageRepo::list(&state.pool).await?;
    let mut result = Vec::with_capacity(packages.len());
    for package in packages {
        result.push(attach_services(&state, package).await?);
    }
    Ok(Json(result))
}

/// GET /api/v1/packages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PackageWithServices>> {
    let package = PackageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(attach_services(&state, package).await?))
}

/// PUT /api/v1/packages/{id}
///
/// A supplied `service_ids` list replaces the covered-service set.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePackage>,
) -> AppResult<Json<PackageWithServices>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    if let Some(price) = input.price {
        validate_price("price", price)?;
    }
    if let Some(session_count) = input.session_count {
        validate_positive("session_count", session_count)?;
    }
    if let Some(validity_days) = input.validity_days {
        validate_positive("validity_days", validity_days)?;
    }
    if let Some(service_ids) = &input.service_ids {
        ensure_services_exist(&state, service_ids).await?;
    }

    let package = PackageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(attach_services(&state, package).await?))
}

/// DELETE /api/v1/packages/{id}
///
/// Hard delete. Covered-service join rows and client purchases cascade.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PackageRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(package_id = %id, "Package deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Package",
        id,
    })
}

/// Reject package definitions referencing services that do not exist.
async fn ensure_services_exist(state: &AppState, service_ids: &[DbId]) -> AppResult<()> {
    if service_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "service_ids must name at least one service".into(),
        )));
    }
    let found = ServiceRepo::count_by_ids(&state.pool, service_ids).await?;
    if found != service_ids.len() as i64 {
        return Err(AppError::Core(CoreError::Validation(
            "service_ids contains one or more unknown services".into(),
        )));
    }
    Ok(())
}

async fn attach_services(state: &AppState, package: Package) -> AppResult<PackageWithServices> {
    let services = PackageRepo::services_of(&state.pool, package.id).await?;
    Ok(PackageWithServices { package, services })
}
