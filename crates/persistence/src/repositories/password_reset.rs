//! Repository for password reset token database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PasswordResetTokenEntity;

/// Repository for password reset token operations.
#[derive(Clone)]
pub struct PasswordResetRepository {
    pool: PgPool,
}

impl PasswordResetRepository {
    /// Creates a new password reset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stores a reset token digest for a user.
    pub async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetTokenEntity, sqlx::Error> {
        sqlx::query_as::<_, PasswordResetTokenEntity>(
            r#"
            INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, expires_at, used_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a token row by its digest.
    pub async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordResetTokenEntity>, sqlx::Error> {
        sqlx::query_as::<_, PasswordResetTokenEntity>(
            r#"
            SELECT id, user_id, token_hash, expires_at, used_at, created_at
            FROM password_reset_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
    }

    /// Marks a token as used atomically.
    ///
    /// The `used_at IS NULL` guard prevents two concurrent confirmations
    /// from both redeeming the same token.
    pub async fn mark_used(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE password_reset_tokens
            SET used_at = NOW()
            WHERE id = $1 AND used_at IS NULL AND expires_at > NOW()
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
