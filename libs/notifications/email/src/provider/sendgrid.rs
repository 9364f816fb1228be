//! SendGrid email provider
//!
//! Sends emails via the SendGrid v3 HTTP API.

use crate::error::{NotificationError, NotificationResult};
use crate::models::Email;
use crate::provider::{EmailProvider, SendResult};
use async_trait::async_trait;
use core_config::{env_optional, env_or_default, ConfigError, FromEnv};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

/// Default SendGrid API base URL
pub const SENDGRID_API_URL: &str = "https://api.sendgrid.com";

const MAIL_SEND_PATH: &str = "/v3/mail/send";

/// SendGrid connection settings
#[derive(Clone, Debug)]
pub struct SendGridConfig {
    pub api_key: String,
    /// Base URL; the mail-send path is appended to it
    pub api_url: String,
    /// Display name attached to the sender address
    pub from_name: Option<String>,
}

impl SendGridConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: SENDGRID_API_URL.to_string(),
            from_name: None,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_from_name(mut self, from_name: impl Into<String>) -> Self {
        self.from_name = Some(from_name.into());
        self
    }

    /// Whether an API key is present; without one every send fails
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn send_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), MAIL_SEND_PATH)
    }
}

impl FromEnv for SendGridConfig {
    /// Reads:
    /// - `SENDGRID_API_KEY` (sends fail until it is set, the server still starts)
    /// - `SENDGRID_API_URL` (default: public SendGrid endpoint)
    /// - `SENDER_NAME` (optional display name)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_or_default("SENDGRID_API_KEY", ""),
            api_url: env_or_default("SENDGRID_API_URL", SENDGRID_API_URL),
            from_name: env_optional("SENDER_NAME"),
        })
    }
}

/// SendGrid email provider
pub struct SendGridProvider {
    config: SendGridConfig,
    client: Client,
}

impl SendGridProvider {
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn build_request(&self, email: &Email) -> NotificationResult<SendGridRequest> {
        if email.to.is_empty() {
            return Err(NotificationError::InvalidInput(
                "Email must have at least one recipient".to_string(),
            ));
        }

        let from = email
            .from
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| {
                NotificationError::InvalidInput("Email must have a sender address".to_string())
            })?;

        let mut content = Vec::new();

        if let Some(text) = &email.body_text {
            content.push(Content {
                content_type: "text/plain".to_string(),
                value: text.clone(),
            });
        }

        if let Some(html) = &email.body_html {
            content.push(Content {
                content_type: "text/html".to_string(),
                value: html.clone(),
            });
        }

        if content.is_empty() {
            return Err(NotificationError::InvalidInput(
                "Email must have text or HTML content".to_string(),
            ));
        }

        let personalization = Personalization {
            to: email.to.iter().map(EmailAddress::bare).collect(),
            cc: email.cc.iter().map(EmailAddress::bare).collect(),
            bcc: email.bcc.iter().map(EmailAddress::bare).collect(),
        };

        Ok(SendGridRequest {
            personalizations: vec![personalization],
            from: EmailAddress {
                email: from.to_string(),
                name: self.config.from_name.clone(),
            },
            subject: email.subject.clone(),
            content,
        })
    }
}

/// SendGrid API request payload
#[derive(Debug, Serialize)]
struct SendGridRequest {
    personalizations: Vec<Personalization>,
    from: EmailAddress,
    subject: String,
    content: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Personalization {
    to: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<EmailAddress>,
}

#[derive(Debug, Serialize)]
struct EmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl EmailAddress {
    fn bare(email: &String) -> Self {
        Self {
            email: email.clone(),
            name: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

#[async_trait]
impl EmailProvider for SendGridProvider {
    async fn send(&self, email: &Email) -> NotificationResult<SendResult> {
        if !self.config.has_api_key() {
            return Err(NotificationError::ConfigError(
                "SendGrid API key not configured".to_string(),
            ));
        }

        let request = self.build_request(email)?;

        debug!(
            email_id = %email.id,
            to = %email.recipients(),
            subject = %email.subject,
            "Sending email via SendGrid"
        );

        let response = self
            .client
            .post(self.config.send_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::provider(format!("SendGrid request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            // SendGrid returns the message ID in the X-Message-Id header
            let message_id = response
                .headers()
                .get("X-Message-Id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or(&email.id)
                .to_string();

            debug!(message_id = %message_id, "Email accepted by SendGrid");

            Ok(SendResult { message_id })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                error = %error_body,
                "SendGrid API error"
            );

            let message = match status.as_u16() {
                429 => "rate limit exceeded".to_string(),
                400 => "invalid request".to_string(),
                401 | 403 => "authentication failed".to_string(),
                _ => format!("SendGrid error ({})", status),
            };

            Err(NotificationError::Provider {
                status: Some(status.as_u16()),
                message,
                body: (!error_body.is_empty()).then_some(error_body),
            })
        }
    }

    async fn health_check(&self) -> NotificationResult<()> {
        if !self.config.has_api_key() {
            return Err(NotificationError::ConfigError(
                "SendGrid API key not configured".to_string(),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sendgrid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SendGridProvider {
        SendGridProvider::new(SendGridConfig::new("SG.test").with_from_name("The Food Collective"))
    }

    #[test]
    fn test_request_puts_all_recipients_in_one_personalization() {
        let email = Email::to_many(
            vec!["owner@example.com".to_string(), "ops@example.com".to_string()],
            "New Order Alert! #TX1",
        )
        .with_html("<p>order</p>")
        .with_from("orders@example.com");

        let json = serde_json::to_value(provider().build_request(&email).unwrap()).unwrap();

        assert_eq!(json["personalizations"].as_array().unwrap().len(), 1);
        assert_eq!(json["personalizations"][0]["to"][1]["email"], "ops@example.com");
        assert!(json["personalizations"][0].get("cc").is_none());
        assert_eq!(json["from"]["email"], "orders@example.com");
        assert_eq!(json["from"]["name"], "The Food Collective");
        assert_eq!(json["content"][0]["type"], "text/html");
    }

    #[test]
    fn test_request_rejects_missing_recipients() {
        let email = Email::to_many(Vec::new(), "Subject")
            .with_html("<p>x</p>")
            .with_from("orders@example.com");

        let err = provider().build_request(&email).unwrap_err();
        assert!(matches!(err, NotificationError::InvalidInput(_)));
    }

    #[test]
    fn test_request_rejects_missing_sender() {
        let email = Email::new("a@example.com", "Subject").with_html("<p>x</p>");
        assert!(provider().build_request(&email).is_err());

        let email = email.with_from("  ");
        assert!(provider().build_request(&email).is_err());
    }

    #[test]
    fn test_request_rejects_empty_content() {
        let email = Email::new("a@example.com", "Subject").with_from("orders@example.com");
        assert!(provider().build_request(&email).is_err());
    }

    #[test]
    fn test_send_url_joins_base() {
        let config = SendGridConfig::new("k").with_api_url("http://127.0.0.1:9000/");
        assert_eq!(config.send_url(), "http://127.0.0.1:9000/v3/mail/send");
    }

    #[tokio::test]
    async fn test_send_without_api_key_fails_fast() {
        let provider = SendGridProvider::new(SendGridConfig::new(""));
        let email = Email::new("a@example.com", "Subject")
            .with_html("<p>x</p>")
            .with_from("orders@example.com");

        assert!(!SendGridConfig::new("  ").has_api_key());
        assert!(SendGridConfig::new("SG.test").has_api_key());

        let err = provider.send(&email).await.unwrap_err();
        assert!(matches!(err, NotificationError::ConfigError(_)));
        assert!(provider.health_check().await.is_err());
    }
}
