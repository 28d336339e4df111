//! User settings entity (database row mapping).

use std::str::FromStr;

use domain::models::Theme;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the user_settings table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSettingsEntity {
    pub user_id: Uuid,
    pub email_notifications: bool,
    pub theme: String,
    pub theme_color: String,
}

impl From<UserSettingsEntity> for domain::models::UserSettings {
    fn from(entity: UserSettingsEntity) -> Self {
        Self {
            user_id: entity.user_id,
            email_notifications: entity.email_notifications,
            // Column is CHECK-constrained to known values
            theme: Theme::from_str(&entity.theme).unwrap_or(Theme::Professional),
            theme_color: entity.theme_color,
        }
    }
}
