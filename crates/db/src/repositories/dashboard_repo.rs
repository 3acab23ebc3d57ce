//! Aggregate queries for the dashboard endpoints.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardStats, UpcomingAppointment};

/// Provides dashboard counters and the upcoming-appointments feed.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Compute the headline counters in one round trip.
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let (total_clients, clients_this_month, active_services, appointments_today, revenue): (
            i64,
            i64,
            i64,
            i64,
            f64,
        ) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM clients),
                (SELECT COUNT(*) FROM clients
                  WHERE created_at >= date_trunc('month', NOW())),
                (SELECT COUNT(*) FROM services WHERE is_active),
                (SELECT COUNT(*) FROM appointments
                  WHERE starts_at >= date_trunc('day', NOW())
                    AND starts_at < date_trunc('day', NOW()) + INTERVAL '1 day'),
                (SELECT COALESCE(SUM(amount), 0) FROM payments
                  WHERE status = 'paid'
                    AND created_at >= date_trunc('month', NOW()))",
        )
        .fetch_one(pool)
        .await?;

        Ok(DashboardStats {
            total_clients,
            clients_this_month,
            active_services,
            appointments_today,
            revenue_this_month: revenue,
        })
    }

    /// Next confirmed appointments from now on, soonest first.
    pub async fn upcoming(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<UpcomingAppointment>, sqlx::Error> {
        sqlx::query_as::<_, UpcomingAppointment>(
            "SELECT a.id, c.name AS client_name, s.name AS service_name,
                    a.starts_at, a.ends_at
             FROM appointments a
             JOIN clients c ON c.id = a.client_id
             JOIN services s ON s.id = a.service_id
             WHERE a.starts_at >= NOW() AND a.status = 'confirmed'
             ORDER BY a.starts_at
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
