//! Profile entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_name: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub industry: String,
    pub job_title: String,
    pub bio: Option<String>,
    pub phones: serde_json::Value,
    pub emails: serde_json::Value,
    pub websites: serde_json::Value,
    pub addresses: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileEntity> for domain::models::UserProfile {
    fn from(entity: ProfileEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            profile_name: entity.profile_name,
            first_name: entity.first_name,
            last_name: entity.last_name,
            company_name: entity.company_name,
            industry: entity.industry,
            job_title: entity.job_title,
            bio: entity.bio,
            phones: entity.phones,
            emails: entity.emails,
            websites: entity.websites,
            addresses: entity.addresses,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the profile_sections table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileSectionEntity {
    pub profile_id: Uuid,
    pub data: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
