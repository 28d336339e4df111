//! Repository for invitation code database operations.

use sqlx::{PgConnection, PgPool};

use crate::entities::InvitationCodeEntity;

/// Repository for invitation code operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Issues an invitation code for an email address.
    ///
    /// If an unused invitation already exists for the email, it is
    /// refreshed in place with the new code and name; otherwise a new
    /// row is inserted. Either way the caller ends up with exactly one
    /// unused invitation carrying the freshly generated code.
    pub async fn issue(
        &self,
        email: &str,
        first_name: &str,
        code: &str,
    ) -> Result<InvitationCodeEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let refreshed = sqlx::query_as::<_, InvitationCodeEntity>(
            r#"
            UPDATE invitation_codes
            SET code = $2, first_name = $3, updated_at = NOW()
            WHERE email = $1 AND is_used = FALSE
            RETURNING id, email, first_name, code, is_used, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(first_name)
        .fetch_optional(&mut *tx)
        .await?;

        let invitation = match refreshed {
            Some(invitation) => invitation,
            None => {
                sqlx::query_as::<_, InvitationCodeEntity>(
                    r#"
                    INSERT INTO invitation_codes (email, first_name, code)
                    VALUES ($1, $2, $3)
                    RETURNING id, email, first_name, code, is_used, created_at, updated_at
                    "#,
                )
                .bind(email)
                .bind(first_name)
                .bind(code)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(invitation)
    }

    /// Redeems an invitation code atomically.
    ///
    /// This uses `AND is_used = FALSE` to prevent race conditions where
    /// two concurrent registrations could both consume the same code.
    ///
    /// Returns `true` if the code was successfully redeemed, `false` if
    /// no unused invitation matched the email and code.
    ///
    /// Takes a connection so callers can run this inside a larger
    /// registration transaction.
    pub async fn redeem(
        conn: &mut PgConnection,
        email: &str,
        code: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE invitation_codes
            SET is_used = TRUE, updated_at = NOW()
            WHERE email = $1 AND code = $2 AND is_used = FALSE
            "#,
        )
        .bind(email)
        .bind(code)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
