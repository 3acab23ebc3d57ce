//! Development bootstrap: seed a first login when the users table is empty.
//!
//! Never runs in production; the registered account is for local
//! development and manual testing only.

use atelier_db::models::user::CreateUser;
use atelier_db::repositories::UserRepo;
use atelier_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Email of the seeded development user.
pub const DEV_USER_EMAIL: &str = "admin@atelier.local";

/// Password of the seeded development user.
pub const DEV_USER_PASSWORD: &str = "admin123!";

/// Create the development user if no users exist yet. Returns `true` when a
/// user was created.
pub async fn seed_dev_user(pool: &DbPool) -> AppResult<bool> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(DEV_USER_PASSWORD)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Admin".to_string(),
            email: DEV_USER_EMAIL.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, email = DEV_USER_EMAIL, "Seeded development user");
    Ok(true)
}
