//! Repository for the `client_packages` table (package purchases).

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::client_package::{
    ClientPackage, ClientPackageSummary, CreateClientPackage, ExpiringPackage,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, package_id, purchased_at, expires_at, \
                       remaining_sessions, status, created_at, updated_at";

/// Provides operations for client package purchases.
pub struct ClientPackageRepo;

impl ClientPackageRepo {
    /// Insert a new purchase, returning the created row. The balance and
    /// expiry are computed by the caller from the package definition.
    pub async fn create(
        pool: &PgPool,
        input: &CreateClientPackage,
    ) -> Result<ClientPackage, sqlx::Error> {
        let query = format!(
            "INSERT INTO client_packages (client_id, package_id, expires_at, remaining_sessions)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientPackage>(&query)
            .bind(input.client_id)
            .bind(input.package_id)
            .bind(input.expires_at)
            .bind(input.remaining_sessions)
            .fetch_one(pool)
            .await
    }

    /// Find a purchase by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ClientPackage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM client_packages WHERE id = $1");
        sqlx::query_as::<_, ClientPackage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a client's purchases, newest first, joined with the package name.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ClientPackageSummary>, sqlx::Error> {
        sqlx::query_as::<_, ClientPackageSummary>(
            "SELECT cp.id, cp.client_id, cp.package_id, p.name AS package_name,
                    cp.purchased_at, cp.expires_at, cp.remaining_sessions, cp.status
             FROM client_packages cp
             JOIN packages p ON p.id = cp.package_id
             WHERE cp.client_id = $1
             ORDER BY cp.purchased_at DESC",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await
    }

    /// List active purchases with remaining balance expiring inside
    /// `[now, until)`, joined for notification logging.
    pub async fn list_expiring_within(
        pool: &PgPool,
        until: Timestamp,
    ) -> Result<Vec<ExpiringPackage>, sqlx::Error> {
        sqlx::query_as::<_, ExpiringPackage>(
            "SELECT cp.id, c.name AS client_name, c.email AS client_email,
                    p.name AS package_name, cp.remaining_sessions, cp.expires_at
             FROM client_packages cp
             JOIN clients c ON c.id = cp.client_id
             JOIN packages p ON p.id = cp.package_id
             WHERE cp.status = 'active'
               AND cp.remaining_sessions > 0
               AND cp.expires_at >= NOW()
               AND cp.expires_at < $1
             ORDER BY cp.expires_at",
        )
        .bind(until)
        .fetch_all(pool)
        .await
    }
}
