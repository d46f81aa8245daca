/**
 * Credential Verification
 *
 * Password hashing and the email/password check behind login. Unknown
 * emails still pay for one bcrypt verification against a throwaway hash so
 * that response time does not reveal which addresses are registered.
 */

use std::sync::OnceLock;

use bcrypt::BcryptError;
use sqlx::SqlitePool;

use crate::backend::auth::users::{self, User};
use crate::backend::error::BackendError;

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

/// Check a password against a stored bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(password, password_hash)
}

fn dummy_hash(cost: u32) -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("swapp-timing-equalizer", cost).ok())
        .as_deref()
}

/// Verify an email/password pair
///
/// Returns `Ok(None)` for an unknown email, a wrong password or an inactive
/// account; callers must not distinguish between those cases.
///
/// # Errors
/// Database and hashing failures propagate as `BackendError`.
pub async fn authenticate(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    cost: u32,
) -> Result<Option<User>, BackendError> {
    let Some(user) = users::get_user_by_email(pool, email).await? else {
        if let Some(hash) = dummy_hash(cost) {
            let _ = verify_password(password, hash);
        }
        tracing::debug!("Login attempt for unknown email");
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Login attempt with wrong password");
        return Ok(None);
    }

    if !user.is_active {
        tracing::debug!(user_id = user.id, "Login attempt on inactive account");
        return Ok(None);
    }

    Ok(Some(user))
}
