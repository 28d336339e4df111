//! Invitation ledger models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A one-time invitation code keyed by email.
///
/// At most one unused row exists per email; reissuing replaces the first
/// name and generates a fresh code on the existing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationCode {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    /// The OTP itself; write-only at the API boundary.
    #[serde(skip_serializing)]
    pub code: String,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for invitation issuance.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct IssueInvitationRequest {
    /// Card the prospective user is holding; must be eligible stock.
    pub card: Uuid,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub password: String,
}

/// Response after issuance. The code is never echoed; it travels by mail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationResponse {
    pub email: String,
    pub first_name: String,
}

impl From<InvitationCode> for InvitationResponse {
    fn from(invitation: InvitationCode) -> Self {
        Self {
            email: invitation.email,
            first_name: invitation.first_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_never_serialized() {
        let invitation = InvitationCode {
            id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            code: "1234".to_string(),
            is_used: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&invitation).unwrap();
        assert!(!json.contains("1234"));
        assert!(json.contains("jane@example.com"));
    }

    #[test]
    fn test_issue_request_validation() {
        let request = IssueInvitationRequest {
            card: Uuid::new_v4(),
            email: "bad".to_string(),
            first_name: String::new(),
            password: "x".to_string(),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("first_name"));
    }
}
