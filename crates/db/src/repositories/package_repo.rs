//! Repository for the `packages` table and its covered-service join rows.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::package::{CreatePackage, Package, UpdatePackage};
use crate::models::service::Service;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, price, session_count, validity_days, is_active, created_at, updated_at";

/// Column list for joined service rows, qualified for use with aliases.
const SERVICE_COLUMNS: &str =
    "s.id, s.name, s.description, s.price, s.duration_minutes, s.is_active, s.created_at, s.updated_at";

/// Provides CRUD operations for packages.
pub struct PackageRepo;

impl PackageRepo {
    /// Insert a new package together with its covered-service rows, in one
    /// transaction. The caller is responsible for checking that all
    /// `service_ids` exist; an unknown id aborts with a foreign-key error.
    pub async fn create(pool: &PgPool, input: &CreatePackage) -> Result<Package, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO packages (name, description, price, session_count, validity_days, is_active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        let package = sqlx::query_as::<_, Package>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.session_count)
            .bind(input.validity_days)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        for service_id in &input.service_ids {
            sqlx::query("INSERT INTO package_services (package_id, service_id) VALUES ($1, $2)")
                .bind(package.id)
                .bind(service_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(package)
    }

    /// Find a package by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Package>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM packages WHERE id = $1");
        sqlx::query_as::<_, Package>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all packages ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Package>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM packages ORDER BY name");
        sqlx::query_as::<_, Package>(&query).fetch_all(pool).await
    }

    /// List the services a package covers, ordered by name.
    pub async fn services_of(pool: &PgPool, package_id: DbId) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {SERVICE_COLUMNS} FROM services s
             JOIN package_services ps ON ps.service_id = s.id
             WHERE ps.package_id = $1
             ORDER BY s.name"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(package_id)
            .fetch_all(pool)
            .await
    }

    /// Update a package. Only non-`None` fields are applied; a supplied
    /// `service_ids` list replaces the covered-service set wholesale, all
    /// within one transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePackage,
    ) -> Result<Option<Package>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE packages SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                session_count = COALESCE($5, session_count),
                validity_days = COALESCE($6, validity_days),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(package) = sqlx::query_as::<_, Package>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.session_count)
            .bind(input.validity_days)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(service_ids) = &input.service_ids {
            sqlx::query("DELETE FROM package_services WHERE package_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for service_id in service_ids {
                sqlx::query(
                    "INSERT INTO package_services (package_id, service_id) VALUES ($1, $2)",
                )
                .bind(id)
                .bind(service_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(package))
    }

    /// Hard-delete a package. Join rows and client purchases cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
