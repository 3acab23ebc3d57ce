//! Client entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full client row from the `clients` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client.
#[derive(Debug, Deserialize)]
pub struct CreateClient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
    /// Free-form labels ("VIP", "indication", ...). Defaults to empty.
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an existing client. All fields are optional; only
/// supplied fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}
