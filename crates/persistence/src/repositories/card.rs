//! Repository for card database operations.

use domain::models::CardFilter;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::CardEntity;

/// Repository for card operations.
#[derive(Clone)]
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    /// Creates a new card repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a card by its identifier.
    pub async fn find_by_id(&self, card_id: Uuid) -> Result<Option<CardEntity>, sqlx::Error> {
        sqlx::query_as::<_, CardEntity>(
            r#"
            SELECT card_id, card_serial_no, user_id, printed, assigned, is_deleted, label, created_at
            FROM cards
            WHERE card_id = $1
            "#,
        )
        .bind(card_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds the non-deleted card bound to a user, if any.
    pub async fn find_active_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CardEntity>, sqlx::Error> {
        sqlx::query_as::<_, CardEntity>(
            r#"
            SELECT card_id, card_serial_no, user_id, printed, assigned, is_deleted, label, created_at
            FROM cards
            WHERE user_id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Binds a card to a user atomically.
    ///
    /// The `user_id IS NULL AND is_deleted = FALSE` guard ensures two
    /// concurrent registrations cannot claim the same card, and that a
    /// retired card can never be bound.
    ///
    /// Returns `true` if the card was bound, `false` if it was already
    /// taken, deleted, or does not exist.
    ///
    /// Takes a connection so callers can run this inside a larger
    /// registration transaction.
    pub async fn bind(
        conn: &mut PgConnection,
        card_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET user_id = $2, assigned = TRUE, updated_at = NOW()
            WHERE card_id = $1
              AND user_id IS NULL
              AND is_deleted = FALSE
              AND (printed = TRUE OR assigned = TRUE)
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Provisions a batch of cards in one statement.
    ///
    /// Serial numbers continue from the current maximum, so batches
    /// provisioned over time form one contiguous sequence.
    pub async fn provision(
        &self,
        count: i32,
        label: Option<&str>,
        printed: bool,
    ) -> Result<Vec<CardEntity>, sqlx::Error> {
        sqlx::query_as::<_, CardEntity>(
            r#"
            INSERT INTO cards (card_serial_no, printed, label)
            SELECT COALESCE((SELECT MAX(card_serial_no) FROM cards), 0) + n, $2, $3
            FROM generate_series(1, $1) AS n
            RETURNING card_id, card_serial_no, user_id, printed, assigned, is_deleted, label, created_at
            "#,
        )
        .bind(count)
        .bind(printed)
        .bind(label)
        .fetch_all(&self.pool)
        .await
    }

    /// Lists cards for the back office, optionally filtered by binding
    /// state, newest serials first.
    pub async fn list(
        &self,
        filter: Option<CardFilter>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CardEntity>, sqlx::Error> {
        let predicate = filter_predicate(filter);

        let query = format!(
            r#"
            SELECT card_id, card_serial_no, user_id, printed, assigned, is_deleted, label, created_at
            FROM cards
            WHERE is_deleted = FALSE AND {predicate}
            ORDER BY card_serial_no DESC
            LIMIT $1 OFFSET $2
            "#,
        );

        sqlx::query_as::<_, CardEntity>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Retires a card, detaching it from its owner.
    ///
    /// Returns the identifier of the former owner, or `None` if the card
    /// was not bound.
    ///
    /// Takes a connection so the caller can deactivate the orphaned
    /// account in the same transaction.
    pub async fn unbind(
        conn: &mut PgConnection,
        card_id: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let owner: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT user_id
            FROM cards
            WHERE card_id = $1 AND user_id IS NOT NULL AND is_deleted = FALSE
            FOR UPDATE
            "#,
        )
        .bind(card_id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some((user_id,)) = owner else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE cards
            SET user_id = NULL, assigned = FALSE, is_deleted = TRUE, updated_at = NOW()
            WHERE card_id = $1
            "#,
        )
        .bind(card_id)
        .execute(conn)
        .await?;

        Ok(Some(user_id))
    }
}

/// SQL predicate for an admin listing filter. `Unused` is unprovisioned
/// stock (neither printed nor assigned), not merely ownerless.
fn filter_predicate(filter: Option<CardFilter>) -> &'static str {
    match filter {
        Some(CardFilter::Used) => "user_id IS NOT NULL",
        Some(CardFilter::Unused) => "printed = FALSE AND assigned = FALSE",
        Some(CardFilter::Printed) => "printed = TRUE",
        None => "TRUE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_filter_selects_unprovisioned_stock() {
        assert_eq!(
            filter_predicate(Some(CardFilter::Unused)),
            "printed = FALSE AND assigned = FALSE"
        );
    }

    #[test]
    fn test_remaining_filters() {
        assert_eq!(filter_predicate(Some(CardFilter::Used)), "user_id IS NOT NULL");
        assert_eq!(filter_predicate(Some(CardFilter::Printed)), "printed = TRUE");
        assert_eq!(filter_predicate(None), "TRUE");
    }
}
