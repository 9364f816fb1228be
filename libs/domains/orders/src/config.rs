use core_config::{env_list, env_optional, env_or_default, env_parse, ConfigError, FromEnv};
use std::time::Duration;

pub const DEFAULT_STORE_NAME: &str = "The Food Collective";
pub const DEFAULT_SEND_TIMEOUT_SECS: u64 = 10;

/// Settings for order notifications, resolved once at startup.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// `from` address of every outgoing email; must be verified with the provider
    pub sender_email: String,
    /// Recipients of the admin alert
    pub business_owner_emails: Vec<String>,
    /// Store name used in the customer subject and email signatures
    pub store_name: String,
    /// Upper bound for a single provider call
    pub send_timeout: Duration,
}

impl NotifierConfig {
    pub fn new(sender_email: impl Into<String>, business_owner_emails: Vec<String>) -> Self {
        Self {
            sender_email: sender_email.into(),
            business_owner_emails,
            store_name: DEFAULT_STORE_NAME.to_string(),
            send_timeout: Duration::from_secs(DEFAULT_SEND_TIMEOUT_SECS),
        }
    }

    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }

    /// Settings that leave orders failing; the server starts anyway
    pub fn problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if self.sender_email.trim().is_empty() {
            problems.push("SENDER_EMAIL is not set; every email send will fail");
        }
        if self.business_owner_emails.is_empty() {
            problems.push("BUSINESS_OWNER_EMAIL is not set; admin alerts have no recipient and orders will fail");
        }
        problems
    }
}

impl FromEnv for NotifierConfig {
    /// Reads:
    /// - `SENDER_EMAIL` (empty if unset; sends are rejected until it is set)
    /// - `BUSINESS_OWNER_EMAIL` comma-separated admin recipients
    /// - `STORE_NAME` (default: The Food Collective)
    /// - `EMAIL_SEND_TIMEOUT_SECS` (default: 10)
    fn from_env() -> Result<Self, ConfigError> {
        let sender_email = env_optional("SENDER_EMAIL").unwrap_or_default();
        let business_owner_emails = env_list("BUSINESS_OWNER_EMAIL");
        let send_timeout_secs = env_parse("EMAIL_SEND_TIMEOUT_SECS", DEFAULT_SEND_TIMEOUT_SECS)?;
        if send_timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "EMAIL_SEND_TIMEOUT_SECS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            sender_email,
            business_owner_emails,
            store_name: env_or_default("STORE_NAME", DEFAULT_STORE_NAME),
            send_timeout: Duration::from_secs(send_timeout_secs),
        })
    }
}
