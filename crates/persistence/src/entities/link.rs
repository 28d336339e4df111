//! Link entity (database row mapping).

use std::str::FromStr;

use chrono::{DateTime, Utc};
use domain::models::LinkType;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the links table.
#[derive(Debug, Clone, FromRow)]
pub struct LinkEntity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub link_type: String,
    pub url: String,
    pub provider: Option<String>,
    pub meta: serde_json::Value,
    pub position: i32,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<LinkEntity> for domain::models::Link {
    fn from(entity: LinkEntity) -> Self {
        Self {
            id: entity.id,
            profile_id: entity.profile_id,
            // Column is CHECK-constrained to known values
            link_type: LinkType::from_str(&entity.link_type).unwrap_or(LinkType::Website),
            url: entity.url,
            provider: entity.provider,
            meta: entity.meta,
            position: entity.position,
            is_deleted: entity.is_deleted,
            created_at: entity.created_at,
        }
    }
}
