//! Handlers for the `/services` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_core::validation::{validate_name, validate_positive, validate_price};
use atelier_db::models::service::{CreateService, Service, UpdateService};
use atelier_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/services
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<Service>)> {
    validate_name("name", &input.name)?;
    validate_price("price", input.price)?;
    validate_positive("duration_minutes", input.duration_minutes)?;

    let service = ServiceRepo::create(&state.pool, &input).await?;
    tracing::info!(service_id = %service.id, "Service created");
    Ok((StatusCode::CREATED, Json(service)))
}

/// GET /api/v1/services
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Service>>> {
    let services = ServiceRepo::list(&state.pool).await?;
    Ok(Json(services))
}

/// GET /api/v1/services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Service>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(service))
}

/// PUT /api/v1/services/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<Service>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    if let Some(price) = input.price {
        validate_price("price", price)?;
    }
    if let Some(duration) = input.duration_minutes {
        validate_positive("duration_minutes", duration)?;
    }

    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(service))
}

/// DELETE /api/v1/services/{id}
///
/// Refused with a conflict while appointments still reference the service.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ServiceRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(service_id = %id, "Service deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}
