//! User profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A public profile. A user may own several; at most one is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Unique handle used in vanity URLs.
    pub profile_name: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub industry: String,
    pub job_title: String,
    pub bio: Option<String>,
    /// Contact detail collections, stored as JSON arrays.
    pub phones: serde_json::Value,
    pub emails: serde_json::Value,
    pub websites: serde_json::Value,
    pub addresses: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateProfileRequest {
    #[validate(custom(function = "shared::validation::validate_profile_name"))]
    pub profile_name: String,

    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 100, message = "Company name must be 1-100 characters"))]
    pub company_name: String,

    #[validate(length(min = 1, max = 100, message = "Industry must be 1-100 characters"))]
    pub industry: String,

    #[validate(length(min = 1, max = 50, message = "Job title must be 1-50 characters"))]
    pub job_title: String,

    pub bio: Option<String>,

    #[serde(default = "empty_array")]
    pub phones: serde_json::Value,

    #[serde(default = "empty_array")]
    pub emails: serde_json::Value,

    #[serde(default = "empty_array")]
    pub websites: serde_json::Value,

    #[serde(default = "empty_array")]
    pub addresses: serde_json::Value,

    /// Activating a profile deactivates the caller's other profiles.
    #[serde(default)]
    pub is_active: bool,
}

fn empty_array() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

/// Compact profile view for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileSummary {
    pub id: Uuid,
    pub profile_name: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub job_title: String,
    pub is_active: bool,
}

impl From<UserProfile> for ProfileSummary {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            profile_name: profile.profile_name,
            first_name: profile.first_name,
            last_name: profile.last_name,
            company_name: profile.company_name,
            job_title: profile.job_title,
            is_active: profile.is_active,
        }
    }
}

/// One entry of the profile-section arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SectionEntry {
    pub name: String,
    pub position: i32,
}

/// The default section arrangement created alongside every new profile.
pub fn default_sections() -> Vec<SectionEntry> {
    [
        "about me",
        "review links",
        "social links",
        "website links",
        "videos",
        "contact information",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| SectionEntry {
        name: (*name).to_string(),
        position: i as i32 + 1,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections_are_contiguous_from_one() {
        let sections = default_sections();
        assert_eq!(sections.len(), 6);
        for (i, section) in sections.iter().enumerate() {
            assert_eq!(section.position, i as i32 + 1);
        }
        assert_eq!(sections[0].name, "about me");
        assert_eq!(sections[5].name, "contact information");
    }

    #[test]
    fn test_create_profile_request_validates_handle() {
        let request = CreateProfileRequest {
            profile_name: "Not Valid!".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            company_name: "Acme".to_string(),
            industry: "Consulting".to_string(),
            job_title: "Partner".to_string(),
            bio: None,
            phones: serde_json::json!([]),
            emails: serde_json::json!([]),
            websites: serde_json::json!([]),
            addresses: serde_json::json!([]),
            is_active: false,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("profile_name"));
    }
}
