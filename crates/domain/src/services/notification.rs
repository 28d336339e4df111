//! Notification payloads.
//!
//! The original system fired these from post-save hooks; here the
//! workflows call the mail sender explicitly, once per state change, after
//! the change commits. Each variant carries everything the template needs.

use serde::Serialize;

/// A notification to be rendered and mailed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Notification {
    /// Sent once when an account is created.
    Welcome { email: String, first_name: String },

    /// Sent on every invitation issuance, carrying the fresh OTP.
    InvitationOtp {
        email: String,
        first_name: String,
        code: String,
    },

    /// Sent after a successful password change (settings-gated).
    PasswordChanged { email: String, first_name: String },

    /// Sent with a reset link during the forgot-password flow.
    PasswordReset {
        email: String,
        first_name: String,
        token: String,
    },

    /// Sent to a profile owner when a visitor exchanges contact details
    /// (settings-gated).
    NewConnection {
        owner_email: String,
        owner_first_name: String,
        connection_name: String,
        connection_email: String,
    },
}

impl Notification {
    /// The recipient address.
    pub fn recipient(&self) -> &str {
        match self {
            Notification::Welcome { email, .. }
            | Notification::InvitationOtp { email, .. }
            | Notification::PasswordChanged { email, .. }
            | Notification::PasswordReset { email, .. } => email,
            Notification::NewConnection { owner_email, .. } => owner_email,
        }
    }

    /// The mail subject line.
    pub fn subject(&self) -> String {
        match self {
            Notification::Welcome { first_name, .. } => format!(
                "{}, welcome to CardLink - let's get started!",
                title_case(first_name)
            ),
            Notification::InvitationOtp { .. } => "CardLink - new user sign up".to_string(),
            Notification::PasswordChanged { .. } => "Your password was changed".to_string(),
            Notification::PasswordReset { .. } => "Reset your password".to_string(),
            Notification::NewConnection { .. } => "You have a new connection".to_string(),
        }
    }
}

/// Uppercases the first letter of each whitespace-separated word, the way
/// first names are displayed in mail templates.
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jane"), "Jane");
        assert_eq!(title_case("mary jo"), "Mary Jo");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_welcome_subject_uses_title_cased_name() {
        let notification = Notification::Welcome {
            email: "jane@example.com".to_string(),
            first_name: "jane".to_string(),
        };
        assert!(notification.subject().starts_with("Jane, welcome"));
        assert_eq!(notification.recipient(), "jane@example.com");
    }

    #[test]
    fn test_connection_recipient_is_owner() {
        let notification = Notification::NewConnection {
            owner_email: "owner@example.com".to_string(),
            owner_first_name: "Олена".to_string(),
            connection_name: "Sam".to_string(),
            connection_email: "sam@example.com".to_string(),
        };
        assert_eq!(notification.recipient(), "owner@example.com");
    }
}
