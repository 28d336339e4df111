//! Card entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the cards table.
#[derive(Debug, Clone, FromRow)]
pub struct CardEntity {
    pub card_id: Uuid,
    pub card_serial_no: i32,
    pub user_id: Option<Uuid>,
    pub printed: bool,
    pub assigned: bool,
    pub is_deleted: bool,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CardEntity> for domain::models::Card {
    fn from(entity: CardEntity) -> Self {
        Self {
            card_id: entity.card_id,
            card_serial_no: entity.card_serial_no,
            user_id: entity.user_id,
            printed: entity.printed,
            assigned: entity.assigned,
            is_deleted: entity.is_deleted,
            label: entity.label,
            created_at: entity.created_at,
        }
    }
}
