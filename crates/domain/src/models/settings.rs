//! Per-user settings models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Profile page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Professional,
    Classic,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Professional => "professional",
            Theme::Classic => "classic",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Theme::Professional),
            "classic" => Ok(Theme::Classic),
            _ => Err(()),
        }
    }
}

/// Settings created automatically for every account. The notification flag
/// gates the password-changed and connection mails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserSettings {
    pub user_id: Uuid,
    pub email_notifications: bool,
    pub theme: Theme,
    pub theme_color: String,
}

/// Partial update of user settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateSettingsRequest {
    pub email_notifications: Option<bool>,

    pub theme: Option<Theme>,

    #[validate(custom(function = "shared::validation::validate_theme_color"))]
    pub theme_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_round_trip() {
        assert_eq!(Theme::from_str("professional"), Ok(Theme::Professional));
        assert_eq!(Theme::from_str("classic"), Ok(Theme::Classic));
        assert!(Theme::from_str("dark").is_err());
    }

    #[test]
    fn test_update_rejects_bad_color() {
        let request = UpdateSettingsRequest {
            email_notifications: None,
            theme: None,
            theme_color: Some("blue".to_string()),
        };
        assert!(request.validate().is_err());
    }
}
