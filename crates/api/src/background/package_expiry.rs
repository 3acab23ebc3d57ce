//! Daily sweep for soon-to-expire package purchases.
//!
//! Spawns a background task that looks for active purchases with remaining
//! balance expiring within the lookahead window and emits one structured
//! log notification per purchase. Read-only: no rows are mutated. Runs on a
//! fixed interval using `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use atelier_db::repositories::ClientPackageRepo;

/// Default notification lookahead: purchases expiring within 7 days.
const DEFAULT_LOOKAHEAD_DAYS: i64 = 7;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 3600); // daily

/// Run the package-expiry notification loop.
///
/// Lookahead is configurable via `PACKAGE_EXPIRY_LOOKAHEAD_DAYS` (defaults
/// to 7). Query failures are logged and the loop continues; the task stops
/// when `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let lookahead_days: i64 = std::env::var("PACKAGE_EXPIRY_LOOKAHEAD_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_LOOKAHEAD_DAYS);

    tracing::info!(
        lookahead_days,
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Package expiry sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Package expiry sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let until = Utc::now() + chrono::Duration::days(lookahead_days);
                match ClientPackageRepo::list_expiring_within(&pool, until).await {
                    Ok(expiring) if expiring.is_empty() => {
                        tracing::debug!("Package expiry sweep: nothing expiring soon");
                    }
                    Ok(expiring) => {
                        tracing::info!(count = expiring.len(), "Package expiry sweep: purchases expiring soon");
                        for purchase in expiring {
                            let days_left = (purchase.expires_at - Utc::now()).num_days();
                            tracing::info!(
                                purchase_id = %purchase.id,
                                client_name = %purchase.client_name,
                                client_email = %purchase.client_email,
                                package_name = %purchase.package_name,
                                remaining_sessions = purchase.remaining_sessions,
                                days_left,
                                "Package expiring soon"
                            );
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Package expiry sweep failed");
                    }
                }
            }
        }
    }
}
