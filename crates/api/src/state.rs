use std::sync::Arc;

use crate::auth::rate_limit::LoginRateLimiter;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Login attempt limiter, constructed once at startup.
    pub login_limiter: Arc<LoginRateLimiter>,
}
