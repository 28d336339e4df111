//! Repository for profile link database operations.

use domain::models::LinkType;
use domain::services::rearrange::{plan_rearrange, RearrangeError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::LinkEntity;

const LINK_COLUMNS: &str =
    "id, profile_id, link_type, url, provider, meta, position, is_deleted, created_at";

/// Failure modes of a rearrange, beyond plain database errors.
#[derive(Debug, thiserror::Error)]
pub enum LinkRearrangeError {
    #[error("link not found in partition")]
    LinkNotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository for profile link operations.
#[derive(Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Creates a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a link at the end of its (profile, type) partition.
    ///
    /// The position is computed from the live row count inside the
    /// insert itself, so concurrent appends cannot read a stale count
    /// separately from the write.
    pub async fn create(
        &self,
        profile_id: Uuid,
        link_type: LinkType,
        url: &str,
        provider: Option<&str>,
        meta: &serde_json::Value,
    ) -> Result<LinkEntity, sqlx::Error> {
        sqlx::query_as::<_, LinkEntity>(&format!(
            r#"
            INSERT INTO links (profile_id, link_type, url, provider, meta, position)
            SELECT $1, $2, $3, $4, $5, COUNT(*) + 1
            FROM links
            WHERE profile_id = $1 AND link_type = $2 AND is_deleted = FALSE
            RETURNING {LINK_COLUMNS}
            "#,
        ))
        .bind(profile_id)
        .bind(link_type.as_str())
        .bind(url)
        .bind(provider)
        .bind(meta)
        .fetch_one(&self.pool)
        .await
    }

    /// Lists the non-deleted links of a profile in display order,
    /// optionally narrowed to one type.
    pub async fn list_active(
        &self,
        profile_id: Uuid,
        link_type: Option<LinkType>,
    ) -> Result<Vec<LinkEntity>, sqlx::Error> {
        match link_type {
            Some(link_type) => {
                sqlx::query_as::<_, LinkEntity>(&format!(
                    r#"
                    SELECT {LINK_COLUMNS}
                    FROM links
                    WHERE profile_id = $1 AND link_type = $2 AND is_deleted = FALSE
                    ORDER BY position
                    "#,
                ))
                .bind(profile_id)
                .bind(link_type.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, LinkEntity>(&format!(
                    r#"
                    SELECT {LINK_COLUMNS}
                    FROM links
                    WHERE profile_id = $1 AND is_deleted = FALSE
                    ORDER BY link_type, position
                    "#,
                ))
                .bind(profile_id)
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    /// Finds a non-deleted link by identifier.
    pub async fn find_active_by_id(&self, id: Uuid) -> Result<Option<LinkEntity>, sqlx::Error> {
        sqlx::query_as::<_, LinkEntity>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Moves `link1` to `link2`'s position, shifting the links between
    /// them by one. The whole reorder commits atomically and the
    /// partition's new ordering is returned.
    pub async fn rearrange(
        &self,
        profile_id: Uuid,
        link_type: LinkType,
        link1: Uuid,
        link2: Uuid,
    ) -> Result<Vec<LinkEntity>, LinkRearrangeError> {
        let mut tx = self.pool.begin().await?;

        let rows: Vec<(Uuid, i32)> = sqlx::query_as(
            r#"
            SELECT id, position
            FROM links
            WHERE profile_id = $1 AND link_type = $2 AND is_deleted = FALSE
            ORDER BY position
            FOR UPDATE
            "#,
        )
        .bind(profile_id)
        .bind(link_type.as_str())
        .fetch_all(&mut *tx)
        .await?;

        let updates = plan_rearrange(&rows, link1, link2)
            .map_err(|RearrangeError::LinkNotFound| LinkRearrangeError::LinkNotFound)?;

        for update in &updates {
            sqlx::query("UPDATE links SET position = $2, updated_at = NOW() WHERE id = $1")
                .bind(update.id)
                .bind(update.position)
                .execute(&mut *tx)
                .await?;
        }

        let reordered = sqlx::query_as::<_, LinkEntity>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE profile_id = $1 AND link_type = $2 AND is_deleted = FALSE
            ORDER BY position
            "#,
        ))
        .bind(profile_id)
        .bind(link_type.as_str())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(reordered)
    }

    /// Soft-deletes a link, scoped to the owning user via the profile.
    ///
    /// The row keeps its position; remaining links close the gap only
    /// through later rearranges, so stale positions above the active
    /// count are expected.
    pub async fn soft_delete(&self, link_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET is_deleted = TRUE, updated_at = NOW()
            FROM profiles
            WHERE links.id = $1
              AND links.is_deleted = FALSE
              AND profiles.id = links.profile_id
              AND profiles.user_id = $2
            "#,
        )
        .bind(link_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
