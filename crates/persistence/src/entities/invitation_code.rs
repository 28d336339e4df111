//! Invitation code entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invitation_codes table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationCodeEntity {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub code: String,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvitationCodeEntity> for domain::models::InvitationCode {
    fn from(entity: InvitationCodeEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            code: entity.code,
            is_used: entity.is_used,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
