//! Repository for profile video database operations.

use domain::models::VideoSource;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::VideoEntity;

const VIDEO_COLUMNS: &str =
    "id, profile_id, video_source, video_url, video_description, created_at";

/// Repository for profile video operations.
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    /// Creates a new video repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches a video to a profile.
    ///
    /// The `profile_id` column is unique; a second video for the same
    /// profile surfaces as a unique violation for the caller to map.
    pub async fn create(
        &self,
        profile_id: Uuid,
        source: VideoSource,
        url: &str,
        description: &str,
    ) -> Result<VideoEntity, sqlx::Error> {
        sqlx::query_as::<_, VideoEntity>(&format!(
            r#"
            INSERT INTO videos (profile_id, video_source, video_url, video_description)
            VALUES ($1, $2, $3, $4)
            RETURNING {VIDEO_COLUMNS}
            "#,
        ))
        .bind(profile_id)
        .bind(source.as_str())
        .bind(url)
        .bind(description)
        .fetch_one(&self.pool)
        .await
    }

    /// The video attached to a profile, if any.
    pub async fn find_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<VideoEntity>, sqlx::Error> {
        sqlx::query_as::<_, VideoEntity>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE profile_id = $1"
        ))
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Replaces a video's content, scoped to the owning user via the
    /// profile. Returns `None` when the video is absent or not owned.
    pub async fn update(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        source: VideoSource,
        url: &str,
        description: &str,
    ) -> Result<Option<VideoEntity>, sqlx::Error> {
        sqlx::query_as::<_, VideoEntity>(
            r#"
            UPDATE videos
            SET video_source = $3, video_url = $4, video_description = $5, updated_at = NOW()
            FROM profiles
            WHERE videos.id = $1
              AND profiles.id = videos.profile_id
              AND profiles.user_id = $2
            RETURNING videos.id, videos.profile_id, videos.video_source,
                      videos.video_url, videos.video_description, videos.created_at
            "#,
        )
        .bind(video_id)
        .bind(user_id)
        .bind(source.as_str())
        .bind(url)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
    }

    /// Removes a video, scoped to the owning user via the profile.
    pub async fn delete(&self, video_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM videos
            USING profiles
            WHERE videos.id = $1
              AND profiles.id = videos.profile_id
              AND profiles.user_id = $2
            "#,
        )
        .bind(video_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
