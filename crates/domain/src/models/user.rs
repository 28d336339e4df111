//! User account models and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for account registration. Binds a card and redeems the
/// invitation code in one step.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RegisterRequest {
    /// Identifier of the physical card being bound.
    pub card: Uuid,

    /// One-time code previously issued to this email.
    #[validate(length(min = 1, message = "This field is required"))]
    pub invitation_code: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
}

/// User fields echoed after registration or login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserAccount> for UserResponse {
    fn from(user: UserAccount) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Response body for successful registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegisterResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub access_token: String,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub password: String,
}

/// Response body for successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Request body for the authenticated password change.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "This field is required"))]
    pub old_password: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub new_password: String,
}

/// Request body for starting the forgot-password flow.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request body for completing the forgot-password flow.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ForgotPasswordConfirmRequest {
    #[validate(length(min = 1, message = "This field is required"))]
    pub token: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    #[test]
    fn test_register_request_validates_email() {
        let request = RegisterRequest {
            card: Uuid::new_v4(),
            invitation_code: "1234".to_string(),
            email: "not-an-email".to_string(),
            password: "quartz-lamp-39".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_accepts_valid_payload() {
        let request = RegisterRequest {
            card: Uuid::new_v4(),
            invitation_code: "1234".to_string(),
            email: SafeEmail().fake(),
            password: "quartz-lamp-39".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };
        request.validate().unwrap();
    }

    #[test]
    fn test_register_request_requires_invitation_code() {
        let request = RegisterRequest {
            card: Uuid::new_v4(),
            invitation_code: String::new(),
            email: SafeEmail().fake(),
            password: "quartz-lamp-39".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("invitation_code"));
    }
}
