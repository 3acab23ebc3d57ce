//! In-memory sliding-window limiter for login attempts.
//!
//! Constructed once at startup and injected through `AppState` -- never a
//! global. State is per-process and lost on restart, which is acceptable for
//! a single-process deployment. The limiter itself is attempt-agnostic; the
//! login handler only records failures.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};

use atelier_core::types::Timestamp;

/// Thresholds for the login rate limiter.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Attempts allowed inside the window before limiting kicks in.
    pub max_attempts: usize,
    /// Sliding window length in seconds.
    pub window_secs: i64,
}

/// Default attempt threshold.
const DEFAULT_MAX_ATTEMPTS: usize = 5;
/// Default window: 15 minutes.
const DEFAULT_WINDOW_SECS: i64 = 900;

impl RateLimitConfig {
    /// Load thresholds from `LOGIN_MAX_ATTEMPTS` / `LOGIN_WINDOW_SECS`.
    pub fn from_env() -> Self {
        let max_attempts = std::env::var("LOGIN_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        let window_secs = std::env::var("LOGIN_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WINDOW_SECS);
        Self {
            max_attempts,
            window_secs,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

/// Sliding-window attempt counter keyed by caller identifier (client IP).
#[derive(Debug)]
pub struct LoginRateLimiter {
    config: RateLimitConfig,
    attempts: Mutex<HashMap<String, Vec<Timestamp>>>,
}

impl LoginRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether the identifier has exhausted its attempts. Prunes
    /// entries older than the window as a side effect.
    pub fn is_limited(&self, identifier: &str) -> bool {
        let cutoff = Utc::now() - Duration::seconds(self.config.window_secs);
        let mut attempts = self.attempts.lock().expect("rate limiter lock poisoned");
        let entry = attempts.entry(identifier.to_string()).or_default();
        entry.retain(|t| *t > cutoff);
        entry.len() >= self.config.max_attempts
    }

    /// Record one attempt for the identifier at the current instant.
    pub fn record_attempt(&self, identifier: &str) {
        let mut attempts = self.attempts.lock().expect("rate limiter lock poisoned");
        attempts
            .entry(identifier.to_string())
            .or_default()
            .push(Utc::now());
    }
}
