/**
 * Refresh Token Blacklist
 *
 * Logout revokes a refresh token by recording its `jti`. Entries are only
 * ever inserted; a refresh token whose id is present is rejected even while
 * its signature and expiry are still valid.
 */

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::Claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    Revoked,
    AlreadyRevoked,
}

/// Record a token as revoked
///
/// Idempotent on `jti`: revoking the same token twice reports
/// `AlreadyRevoked` instead of failing.
pub async fn revoke(
    pool: &SqlitePool,
    claims: &Claims,
    user_id: i64,
) -> Result<RevokeOutcome, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO token_blacklist (jti, user_id, expires_at, blacklisted_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(jti) DO NOTHING
        "#,
    )
    .bind(&claims.jti)
    .bind(user_id)
    .bind(claims.expires_at())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        Ok(RevokeOutcome::AlreadyRevoked)
    } else {
        tracing::debug!(user_id, jti = %claims.jti, "Refresh token revoked");
        Ok(RevokeOutcome::Revoked)
    }
}

/// Whether a token id has been revoked
pub async fn is_revoked(pool: &SqlitePool, jti: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM token_blacklist WHERE jti = ?")
        .bind(jti)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
