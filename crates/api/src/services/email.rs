//! Outbound email for post-purchase rating invitations.
//!
//! Three providers: `console` logs the message (development), `smtp`
//! fails until a real transport is wired in, `sendgrid` calls the v3
//! mail API.

use crate::config::EmailConfig;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
}

/// Sender abstraction used by the rating email sweep so tests can
/// substitute a recording or failing implementation. The token is passed
/// raw; the implementation turns it into a storefront link.
#[async_trait]
pub trait RatingEmailSender: Send + Sync {
    async fn send_rating_email(
        &self,
        to_email: &str,
        to_name: &str,
        token: &str,
    ) -> Result<(), EmailError>;
}

#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Builds the storefront link a customer follows to rate an order.
    pub fn rating_link(&self, token: &str) -> String {
        format!("{}/rate-order?token={}", self.config.base_url, token)
    }

    /// Dispatches to the configured provider. A disabled service drops
    /// the message and reports success.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(to = %message.to, subject = %message.subject, "Email disabled, dropping message");
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message),
            "smtp" => self.send_smtp(message),
            "sendgrid" => self.send_sendgrid(message).await,
            other => {
                error!(provider = %other, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            to_name = ?message.to_name,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            subject = %message.subject,
            body = %message.body_text,
            "Email (console provider)"
        );
        Ok(())
    }

    // TODO: wire up lettre for real SMTP delivery; deployments use the
    // sendgrid provider today. Until then this must fail so callers do not
    // mark a message as delivered
    fn send_smtp(&self, message: EmailMessage) -> Result<(), EmailError> {
        warn!(
            host = %self.config.smtp_host,
            port = %self.config.smtp_port,
            to = %message.to,
            subject = %message.subject,
            "SMTP provider has no transport, message not delivered"
        );
        Err(EmailError::NotConfigured)
    }

    fn sendgrid_payload(&self, message: &EmailMessage) -> serde_json::Value {
        let mut recipient = serde_json::json!({ "email": message.to });
        if let Some(name) = &message.to_name {
            recipient["name"] = serde_json::json!(name);
        }

        let mut content = vec![serde_json::json!({
            "type": "text/plain",
            "value": message.body_text
        })];
        if let Some(html) = &message.body_html {
            content.push(serde_json::json!({
                "type": "text/html",
                "value": html
            }));
        }

        serde_json::json!({
            "personalizations": [{ "to": [recipient] }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": content
        })
    }

    async fn send_sendgrid(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let response = reqwest::Client::new()
            .post("https://api.sendgrid.com/v3/mail/send")
            .bearer_auth(&self.config.sendgrid_api_key)
            .json(&self.sendgrid_payload(&message))
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(format!("SendGrid request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            info!(to = %message.to, subject = %message.subject, "Email sent via SendGrid");
            return Ok(());
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, error = %error_body, "SendGrid API error");
        Err(EmailError::ProviderError(format!(
            "SendGrid returned {}: {}",
            status, error_body
        )))
    }
}

#[async_trait]
impl RatingEmailSender for EmailService {
    async fn send_rating_email(
        &self,
        to_email: &str,
        to_name: &str,
        token: &str,
    ) -> Result<(), EmailError> {
        let body_text = format!(
            r#"Hi {name},

Thanks for shopping with us! We'd love to hear what you think of the
products in your recent order. Rating takes less than a minute:

{url}

The link works once, so your rating stays yours.

Best regards,
The Bamboo Commerce Team"#,
            name = to_name,
            url = self.rating_link(token)
        );

        self.send(EmailMessage {
            to: to_email.to_string(),
            to_name: Some(to_name.to_string()),
            subject: "How was your order? - Bamboo Commerce".to_string(),
            body_text,
            body_html: None,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            provider: "console".to_string(),
            base_url: "https://shop.example.com".to_string(),
            sender_email: "test@example.com".to_string(),
            sender_name: "Test".to_string(),
            ..EmailConfig::default()
        }
    }

    fn message_to(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            to_name: None,
            subject: "Test".to_string(),
            body_text: "Test body".to_string(),
            body_html: None,
        }
    }

    #[test]
    fn test_enabled_flag() {
        assert!(EmailService::new(console_config()).is_enabled());

        let mut config = console_config();
        config.enabled = false;
        assert!(!EmailService::new(config).is_enabled());
    }

    #[test]
    fn test_rating_link() {
        let service = EmailService::new(console_config());
        assert_eq!(
            service.rating_link("abc-123"),
            "https://shop.example.com/rate-order?token=abc-123"
        );
    }

    #[test]
    fn test_sendgrid_payload_shape() {
        let service = EmailService::new(console_config());
        let mut message = message_to("user@example.com");
        message.to_name = Some("Test User".to_string());
        message.body_html = Some("<p>hi</p>".to_string());

        let payload = service.sendgrid_payload(&message);
        assert_eq!(
            payload["personalizations"][0]["to"][0]["email"],
            "user@example.com"
        );
        assert_eq!(payload["personalizations"][0]["to"][0]["name"], "Test User");
        assert_eq!(payload["content"].as_array().unwrap().len(), 2);
        assert_eq!(payload["content"][1]["type"], "text/html");
    }

    #[tokio::test]
    async fn test_send_console_email() {
        let service = EmailService::new(console_config());
        assert!(service.send(message_to("user@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_disabled_silently_succeeds() {
        let mut config = console_config();
        config.enabled = false;
        let service = EmailService::new(config);
        assert!(service.send(message_to("user@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_rating_email() {
        let service = EmailService::new(console_config());
        let result = service
            .send_rating_email("user@example.com", "Test User", "some-token")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_smtp_provider_fails_until_transport_exists() {
        let mut config = console_config();
        config.provider = "smtp".to_string();
        config.smtp_host = "mail.example.com".to_string();
        let service = EmailService::new(config);

        // Reporting success here would let the sweep mark an order as
        // emailed without anything being delivered
        assert!(matches!(
            service.send(message_to("user@example.com")).await,
            Err(EmailError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_unknown_provider_fails() {
        let mut config = console_config();
        config.provider = "carrier-pigeon".to_string();
        let service = EmailService::new(config);
        assert!(matches!(
            service.send(message_to("user@example.com")).await,
            Err(EmailError::NotConfigured)
        ));
    }
}
