//! Email service for the platform's transactional mail.
//!
//! Providers:
//! - `console`: Logs emails to the application log (development)
//! - `sendgrid`: Sends via the SendGrid API
//!
//! Every caller treats sending as fire-and-forget: failures are logged
//! and never surface to the request that triggered the mail.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use domain::services::notification::{title_case, Notification};

use crate::config::{EmailConfig, LinksConfig};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    links: Arc<LinksConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig, links: LinksConfig) -> Self {
        Self {
            config: Arc::new(config),
            links: Arc::new(links),
        }
    }

    /// Renders and sends a notification.
    pub async fn send(&self, notification: Notification) -> Result<(), EmailError> {
        let to = notification.recipient().to_string();
        let subject = notification.subject();
        let body_text = self.render(&notification);

        if !self.config.enabled {
            debug!(to = %to, subject = %subject, "Email service disabled, skipping send");
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(&to, &subject, &body_text),
            "sendgrid" => self.send_sendgrid(&to, &subject, &body_text).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Sends a notification in the background, logging failures.
    ///
    /// Workflows call this exactly once per state change, after the
    /// change commits; the triggering request never waits on delivery.
    pub fn send_detached(&self, notification: Notification) {
        let service = self.clone();
        tokio::spawn(async move {
            let kind = notification.subject();
            if let Err(err) = service.send(notification).await {
                warn!(error = %err, subject = %kind, "Failed to send notification email");
            }
        });
    }

    fn render(&self, notification: &Notification) -> String {
        match notification {
            Notification::Welcome { first_name, .. } => format!(
                "Hi {name},\n\n\
                 Welcome to {sender}! Your account is ready. Set up your profile, \
                 add your links and start sharing your card.\n\n\
                 Best regards,\nThe {sender} Team",
                name = title_case(first_name),
                sender = self.config.sender_name,
            ),
            Notification::InvitationOtp {
                first_name, code, ..
            } => format!(
                "Hi {name},\n\n\
                 Your one-time code is: {code}\n\n\
                 Enter it to finish creating your account. If you did not request \
                 this, you can safely ignore this email.\n\n\
                 Best regards,\nThe {sender} Team",
                name = title_case(first_name),
                code = code,
                sender = self.config.sender_name,
            ),
            Notification::PasswordChanged { first_name, .. } => format!(
                "Hi {name},\n\n\
                 Your password was just changed. If this wasn't you, contact \
                 support immediately.\n\n\
                 Best regards,\nThe {sender} Team",
                name = title_case(first_name),
                sender = self.config.sender_name,
            ),
            Notification::PasswordReset {
                first_name, token, ..
            } => format!(
                "Hi {name},\n\n\
                 We received a request to reset your password. Open the link \
                 below to choose a new one:\n\n\
                 {url}?token={token}\n\n\
                 If you didn't request a reset, your password remains unchanged.\n\n\
                 Best regards,\nThe {sender} Team",
                name = title_case(first_name),
                url = self.links.password_reset_url,
                token = token,
                sender = self.config.sender_name,
            ),
            Notification::NewConnection {
                owner_first_name,
                connection_name,
                connection_email,
                ..
            } => format!(
                "Hi {name},\n\n\
                 {connection} ({email}) just exchanged contact details with your \
                 profile. Their details are saved in your connections.\n\n\
                 Best regards,\nThe {sender} Team",
                name = title_case(owner_first_name),
                connection = connection_name,
                email = connection_email,
                sender = self.config.sender_name,
            ),
        }
    }

    /// Console provider - logs the mail instead of sending it.
    fn send_console(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        info!(
            to = %to,
            subject = %subject,
            body = %body,
            "Email (console provider)"
        );
        Ok(())
    }

    /// SendGrid provider - sends via the SendGrid API.
    async fn send_sendgrid(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let client = reqwest::Client::new();
        let payload = serde_json::json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": subject,
            "content": [{
                "type": "text/plain",
                "value": body
            }]
        });

        let response = client
            .post("https://api.sendgrid.com/v3/mail/send")
            .header(
                "Authorization",
                format!("Bearer {}", self.config.sendgrid_api_key),
            )
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(format!("SendGrid request failed: {}", e)))?;

        if response.status().is_success() {
            info!(to = %to, subject = %subject, "Email sent via SendGrid");
            Ok(())
        } else {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_body, "SendGrid API error");
            Err(EmailError::ProviderError(format!(
                "SendGrid returned {}: {}",
                status, error_body
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(enabled: bool) -> EmailService {
        EmailService::new(
            EmailConfig {
                enabled,
                provider: "console".to_string(),
                sendgrid_api_key: String::new(),
                sender_email: "test@example.com".to_string(),
                sender_name: "CardLink".to_string(),
            },
            LinksConfig {
                profile_base_url: "https://cardlink.test/card".to_string(),
                password_reset_url: "https://cardlink.test/reset-password".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_send_disabled_silently_succeeds() {
        let service = test_service(false);
        let result = service
            .send(Notification::Welcome {
                email: "user@example.com".to_string(),
                first_name: "jane".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_console_email() {
        let service = test_service(true);
        let result = service
            .send(Notification::InvitationOtp {
                email: "user@example.com".to_string(),
                first_name: "jane".to_string(),
                code: "4821".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_otp_mail_carries_code() {
        let service = test_service(true);
        let body = service.render(&Notification::InvitationOtp {
            email: "user@example.com".to_string(),
            first_name: "jane".to_string(),
            code: "4821".to_string(),
        });
        assert!(body.contains("4821"));
        assert!(body.contains("Jane"));
    }

    #[test]
    fn test_reset_mail_builds_link_from_config() {
        let service = test_service(true);
        let body = service.render(&Notification::PasswordReset {
            email: "user@example.com".to_string(),
            first_name: "jane".to_string(),
            token: "abc123".to_string(),
        });
        assert!(body.contains("https://cardlink.test/reset-password?token=abc123"));
    }
}
