//! JWT access/refresh token generation and validation.
//!
//! Both token kinds are HS256-signed JWTs over the same secret,
//! distinguished by the `token_type` claim. Validation fails closed: any
//! defect (bad signature, expiry, malformed input, wrong type) yields `None`
//! for the caller, with the distinct cause logged server-side only.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_core::types::DbId;

/// Claim value identifying an access token.
pub const TOKEN_TYPE_ACCESS: &str = "access";

/// Claim value identifying a refresh token.
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's email.
    pub sub: String,
    /// The user's internal database id.
    pub user_id: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit trails.
    pub jti: String,
    /// Token kind: `"access"` or `"refresh"`.
    pub token_type: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 30).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 30;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Fallback secret for local development only.
const DEV_SECRET: &str = "dev-secret-change-me";

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required            | Default |
    /// |----------------------------|---------------------|---------|
    /// | `JWT_SECRET`               | in production       | dev fallback |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no                  | `30`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no                  | `7`     |
    ///
    /// # Panics
    ///
    /// Panics when `production` is set and `JWT_SECRET` is missing, empty,
    /// or still the development fallback.
    pub fn from_env(production: bool) -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string());
        if production {
            assert!(
                !secret.is_empty() && secret != DEV_SECRET,
                "JWT_SECRET must be set to a real secret in production"
            );
        }

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    email: &str,
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    generate_token(
        email,
        user_id,
        TOKEN_TYPE_ACCESS,
        config.access_token_expiry_mins * 60,
        config,
    )
}

/// Generate an HS256 refresh token for the given user.
pub fn generate_refresh_token(
    email: &str,
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    generate_token(
        email,
        user_id,
        TOKEN_TYPE_REFRESH,
        config.refresh_token_expiry_days * 24 * 3600,
        config,
    )
}

fn generate_token(
    email: &str,
    user_id: DbId,
    token_type: &str,
    lifetime_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: email.to_string(),
        user_id,
        exp: now + lifetime_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
        token_type: token_type.to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a token of the expected type, returning its [`Claims`].
///
/// Never raises to the caller: signature mismatch, expiry, malformed tokens,
/// and type mismatch all collapse into `None`. The distinct causes are
/// logged server-side so operators can still tell them apart.
pub fn verify_token(token: &str, expected_type: &str, config: &JwtConfig) -> Option<Claims> {
    let token_data = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    ) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "Token validation failed");
            return None;
        }
    };

    if token_data.claims.token_type != expected_type {
        tracing::warn!(
            expected = expected_type,
            got = %token_data.claims.token_type,
            "Token type mismatch"
        );
        return None;
    }

    Some(token_data.claims)
}
