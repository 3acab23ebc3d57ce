//! Client package-purchase model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full purchase row from the `client_packages` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClientPackage {
    pub id: DbId,
    pub client_id: DbId,
    pub package_id: DbId,
    pub purchased_at: Timestamp,
    pub expires_at: Timestamp,
    pub remaining_sessions: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Purchase row joined with the package name, for per-client listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ClientPackageSummary {
    pub id: DbId,
    pub client_id: DbId,
    pub package_id: DbId,
    pub package_name: String,
    pub purchased_at: Timestamp,
    pub expires_at: Timestamp,
    pub remaining_sessions: i32,
    pub status: String,
}

/// Request body for selling a package to a client. The balance and expiry
/// are derived from the package itself, never supplied by the caller.
#[derive(Debug, Deserialize)]
pub struct SellPackage {
    pub package_id: DbId,
}

/// Insert values for a purchase, computed by the sale handler.
#[derive(Debug)]
pub struct CreateClientPackage {
    pub client_id: DbId,
    pub package_id: DbId,
    pub expires_at: Timestamp,
    pub remaining_sessions: i32,
}

/// Purchase nearing expiry, joined for the notifier's log output.
#[derive(Debug, Clone, FromRow)]
pub struct ExpiringPackage {
    pub id: DbId,
    pub client_name: String,
    pub client_email: String,
    pub package_name: String,
    pub remaining_sessions: i32,
    pub expires_at: Timestamp,
}
