//! Mock email provider for testing

use super::{EmailProvider, SendResult};
use crate::error::{NotificationError, NotificationResult};
use crate::models::Email;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Mock email provider that captures every send attempt.
///
/// Cloning shares the captured state, so a test can keep one handle while
/// the code under test owns another.
#[derive(Clone, Default)]
pub struct MockEmailProvider {
    attempts: Arc<Mutex<Vec<Email>>>,
    sent_emails: Arc<Mutex<Vec<Email>>>,
    fail_all: Option<String>,
    failing_recipients: HashSet<String>,
    panicking_recipients: HashSet<String>,
    delay: Option<Duration>,
    recipient_delays: HashMap<String, Duration>,
}

impl MockEmailProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider that always fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_all: Some(message.into()),
            ..Self::default()
        }
    }

    /// Fail any email addressed to `address`; everything else succeeds
    pub fn failing_for(mut self, address: impl Into<String>) -> Self {
        self.failing_recipients.insert(address.into());
        self
    }

    /// Sleep before answering each send
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sleep before answering sends addressed to `address`; overrides [`with_delay`](Self::with_delay)
    pub fn delaying_for(mut self, address: impl Into<String>, delay: Duration) -> Self {
        self.recipient_delays.insert(address.into(), delay);
        self
    }

    /// Panic inside `send` for emails addressed to `address`
    pub fn panicking_for(mut self, address: impl Into<String>) -> Self {
        self.panicking_recipients.insert(address.into());
        self
    }

    fn delay_for(&self, email: &Email) -> Option<Duration> {
        email
            .to
            .iter()
            .filter_map(|to| self.recipient_delays.get(to).copied())
            .max()
            .or(self.delay)
    }

    pub async fn attempt_count(&self) -> usize {
        self.attempts.lock().await.len()
    }

    /// Emails that were accepted
    pub async fn sent_emails(&self) -> Vec<Email> {
        self.sent_emails.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent_emails.lock().await.len()
    }

    /// Clear all captured emails
    pub async fn clear(&self) {
        self.attempts.lock().await.clear();
        self.sent_emails.lock().await.clear();
    }

    /// Check if an email was accepted for a specific address
    pub async fn was_sent_to(&self, address: &str) -> bool {
        self.sent_emails
            .lock()
            .await
            .iter()
            .any(|e| e.is_addressed_to(address))
    }

    /// Check if a send was attempted for a specific address
    pub async fn was_attempted_for(&self, address: &str) -> bool {
        self.attempts
            .lock()
            .await
            .iter()
            .any(|e| e.is_addressed_to(address))
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send(&self, email: &Email) -> NotificationResult<SendResult> {
        self.attempts.lock().await.push(email.clone());

        if let Some(delay) = self.delay_for(email) {
            tokio::time::sleep(delay).await;
        }

        if email.to.iter().any(|to| self.panicking_recipients.contains(to)) {
            panic!("mock provider panicked for {}", email.recipients());
        }

        if let Some(message) = &self.fail_all {
            return Err(NotificationError::provider(message.clone()));
        }

        if email.to.iter().any(|to| self.failing_recipients.contains(to)) {
            return Err(NotificationError::Provider {
                status: Some(400),
                message: "invalid request".to_string(),
                body: Some(format!(
                    r#"{{"errors":[{{"message":"rejected recipient","field":"personalizations.0.to"}}],"email_id":"{}"}}"#,
                    email.id
                )),
            });
        }

        self.sent_emails.lock().await.push(email.clone());

        Ok(SendResult {
            message_id: format!("mock-{}", email.id),
        })
    }

    async fn health_check(&self) -> NotificationResult<()> {
        if self.fail_all.is_some() {
            return Err(NotificationError::provider("Mock health check failed"));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
