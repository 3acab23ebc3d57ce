//! Queries behind the package-consumption report.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::report::{ConsumptionPurchase, ConsumptionReportRow, ConsumptionUsage};

/// Optional filters for the consumption report.
#[derive(Debug, Default)]
pub struct ConsumptionFilters {
    pub client_id: Option<DbId>,
    /// Purchases made at or after this instant.
    pub purchased_from: Option<Timestamp>,
    /// Purchases made strictly before this instant.
    pub purchased_before: Option<Timestamp>,
}

/// Produces consumption report rows.
pub struct ReportRepo;

impl ReportRepo {
    /// One row per purchase matching the filters, newest purchase first.
    ///
    /// The usage list holds the client's completed appointments for services
    /// the package covers, between purchase and expiration, in chronological
    /// order, capped at the package's session count.
    pub async fn consumption(
        pool: &PgPool,
        filters: &ConsumptionFilters,
    ) -> Result<Vec<ConsumptionReportRow>, sqlx::Error> {
        let purchases = sqlx::query_as::<_, ConsumptionPurchase>(
            "SELECT cp.id, cp.client_id, cp.package_id,
                    c.name AS client_name, p.name AS package_name,
                    cp.purchased_at, cp.expires_at,
                    p.session_count, cp.remaining_sessions, cp.status
             FROM client_packages cp
             JOIN clients c ON c.id = cp.client_id
             JOIN packages p ON p.id = cp.package_id
             WHERE ($1::uuid IS NULL OR cp.client_id = $1)
               AND ($2::timestamptz IS NULL OR cp.purchased_at >= $2)
               AND ($3::timestamptz IS NULL OR cp.purchased_at < $3)
             ORDER BY cp.purchased_at DESC",
        )
        .bind(filters.client_id)
        .bind(filters.purchased_from)
        .bind(filters.purchased_before)
        .fetch_all(pool)
        .await?;

        let mut rows = Vec::with_capacity(purchases.len());
        for purchase in purchases {
            let usage = Self::usage_for(pool, &purchase).await?;
            rows.push(ConsumptionReportRow {
                client_name: purchase.client_name,
                package_name: purchase.package_name,
                purchased_at: purchase.purchased_at,
                expires_at: purchase.expires_at,
                total_sessions: purchase.session_count,
                remaining_sessions: purchase.remaining_sessions,
                status: purchase.status,
                usage,
            });
        }
        Ok(rows)
    }

    /// Completed appointments counted against one purchase. The LIMIT caps
    /// the list at the package's session count.
    async fn usage_for(
        pool: &PgPool,
        purchase: &ConsumptionPurchase,
    ) -> Result<Vec<ConsumptionUsage>, sqlx::Error> {
        sqlx::query_as::<_, ConsumptionUsage>(
            "SELECT a.starts_at AS used_at, s.name AS service_name
             FROM appointments a
             JOIN services s ON s.id = a.service_id
             JOIN package_services ps
               ON ps.service_id = a.service_id AND ps.package_id = $2
             WHERE a.client_id = $1
               AND a.status = 'completed'
               AND a.starts_at >= $3
               AND a.starts_at <= $4
             ORDER BY a.starts_at
             LIMIT $5",
        )
        .bind(purchase.client_id)
        .bind(purchase.package_id)
        .bind(purchase.purchased_at)
        .bind(purchase.expires_at)
        .bind(i64::from(purchase.session_count))
        .fetch_all(pool)
        .await
    }
}
