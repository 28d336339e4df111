//! Video entity (database row mapping).

use std::str::FromStr;

use chrono::{DateTime, Utc};
use domain::models::VideoSource;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the videos table.
#[derive(Debug, Clone, FromRow)]
pub struct VideoEntity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub video_source: String,
    pub video_url: String,
    pub video_description: String,
    pub created_at: DateTime<Utc>,
}

impl From<VideoEntity> for domain::models::Video {
    fn from(entity: VideoEntity) -> Self {
        Self {
            id: entity.id,
            profile_id: entity.profile_id,
            // Column is CHECK-constrained to known values
            video_source: VideoSource::from_str(&entity.video_source)
                .unwrap_or(VideoSource::Youtube),
            video_url: entity.video_url,
            video_description: entity.video_description,
            created_at: entity.created_at,
        }
    }
}
