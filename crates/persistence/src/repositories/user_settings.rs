//! Repository for user settings database operations.

use domain::models::{Theme, UpdateSettingsRequest};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::UserSettingsEntity;

/// Repository for user settings operations.
#[derive(Clone)]
pub struct UserSettingsRepository {
    pool: PgPool,
}

impl UserSettingsRepository {
    /// Creates a new user settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the default settings row for a user.
    ///
    /// Takes a connection so callers can run this inside a larger
    /// registration transaction.
    pub async fn create_defaults(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<UserSettingsEntity, sqlx::Error> {
        sqlx::query_as::<_, UserSettingsEntity>(
            r#"
            INSERT INTO user_settings (user_id)
            VALUES ($1)
            RETURNING user_id, email_notifications, theme, theme_color
            "#,
        )
        .bind(user_id)
        .fetch_one(conn)
        .await
    }

    /// Fetches the settings of a user.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserSettingsEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserSettingsEntity>(
            r#"
            SELECT user_id, email_notifications, theme, theme_color
            FROM user_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Applies a partial settings update. Absent fields keep their
    /// stored values.
    pub async fn update(
        &self,
        user_id: Uuid,
        request: &UpdateSettingsRequest,
    ) -> Result<Option<UserSettingsEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserSettingsEntity>(
            r#"
            UPDATE user_settings
            SET email_notifications = COALESCE($2, email_notifications),
                theme = COALESCE($3, theme),
                theme_color = COALESCE($4, theme_color),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, email_notifications, theme, theme_color
            "#,
        )
        .bind(user_id)
        .bind(request.email_notifications)
        .bind(request.theme.map(|theme: Theme| theme.as_str()))
        .bind(&request.theme_color)
        .fetch_optional(&self.pool)
        .await
    }
}
