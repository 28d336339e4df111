//! Connection entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the connections table.
#[derive(Debug, Clone, FromRow)]
pub struct ConnectionEntity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub email: String,
    pub contact_number: String,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ConnectionEntity> for domain::models::Connection {
    fn from(entity: ConnectionEntity) -> Self {
        Self {
            id: entity.id,
            profile_id: entity.profile_id,
            name: entity.name,
            email: entity.email,
            contact_number: entity.contact_number,
            company_name: entity.company_name,
            created_at: entity.created_at,
        }
    }
}
