//! Service-package entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::service::Service;

/// Full package row from the `packages` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Package {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub session_count: i32,
    pub validity_days: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A package together with the services it covers, for API responses.
#[derive(Debug, Serialize)]
pub struct PackageWithServices {
    #[serde(flatten)]
    pub package: Package,
    pub services: Vec<Service>,
}

/// DTO for creating a new package.
#[derive(Debug, Deserialize)]
pub struct CreatePackage {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub session_count: i32,
    pub validity_days: i32,
    pub is_active: Option<bool>,
    /// Services the package covers. Must all exist.
    pub service_ids: Vec<DbId>,
}

/// DTO for updating an existing package. All fields are optional; supplying
/// `service_ids` replaces the covered-service set wholesale.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePackage {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub session_count: Option<i32>,
    pub validity_days: Option<i32>,
    pub is_active: Option<bool>,
    pub service_ids: Option<Vec<DbId>>,
}
