//! Contact-exchange (connection) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A contact left by a profile visitor. Unique per (profile, email) and
/// (profile, contact_number).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Connection {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub email: String,
    pub contact_number: String,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for exchanging contact details with a profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateConnectionRequest {
    pub profile: Uuid,

    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_phone_number"))]
    pub contact_number: String,

    #[validate(length(max = 50, message = "Company name must be at most 50 characters"))]
    pub company_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_connection_request_validation() {
        let request = CreateConnectionRequest {
            profile: Uuid::new_v4(),
            name: "Sam Visitor".to_string(),
            email: "sam@example.com".to_string(),
            contact_number: "+14155552671".to_string(),
            company_name: None,
        };
        request.validate().unwrap();
    }

    #[test]
    fn test_create_connection_rejects_bad_phone() {
        let request = CreateConnectionRequest {
            profile: Uuid::new_v4(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            contact_number: "call me maybe".to_string(),
            company_name: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("contact_number"));
    }
}
