//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_core::validation::{validate_email, validate_name, validate_notes, validate_phone};
use atelier_db::models::client::{Client, CreateClient, UpdateClient};
use atelier_db::repositories::ClientRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for the client list (`?limit=&sort=asc|desc`).
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    validate_create(&input)?;
    let client = ClientRepo::create(&state.pool, &input).await?;
    tracing::info!(client_id = %client.id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/v1/clients
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Client>>> {
    let descending = params
        .sort
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("desc"));
    let limit = params.limit.filter(|l| *l > 0);
    let clients = ClientRepo::list(&state.pool, limit, descending).await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(client))
}

/// PUT /api/v1/clients/{id}
///
/// Partial update: only supplied fields are validated and applied.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    validate_update(&input)?;
    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(client))
}

/// DELETE /api/v1/clients/{id}
///
/// Hard delete. The client's appointments and package purchases cascade.
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ClientRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(client_id = %id, "Client deleted");
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
        entity: "Client",
        id,
    })
}

fn validate_create(input: &CreateClient) -> AppResult<()> {
    validate_name("name", &input.name)?;
    validate_phone(&input.phone)?;
    validate_email(&input.email)?;
    if let Some(notes) = &input.notes {
        validate_notes(notes)?;
    }
    Ok(())
}

fn validate_update(input: &UpdateClient) -> AppResult<()> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }
    if let Some(notes) = &input.notes {
        validate_notes(notes)?;
    }
    Ok(())
}
