use serde::{Deserialize, Serialize};

/// Email message to be sent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Email {
    /// Local identifier, used to correlate log lines for one message
    pub id: String,
    /// Recipient addresses; all of them receive the same message
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    /// Sender address
    pub from: Option<String>,
}

impl Email {
    /// Create a new email for a single recipient
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::to_many(vec![to.into()], subject)
    }

    /// Create a new email addressed to every entry of `to`
    pub fn to_many(to: Vec<String>, subject: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            to,
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: subject.into(),
            body_text: None,
            body_html: None,
            from: None,
        }
    }

    /// Set HTML body
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.body_html = Some(html.into());
        self
    }

    /// Set sender address
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Whether `address` is one of the direct recipients
    pub fn is_addressed_to(&self, address: &str) -> bool {
        self.to.iter().any(|to| to == address)
    }

    /// Recipients joined for log output
    pub fn recipients(&self) -> String {
        self.to.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_builder() {
        let email = Email::to_many(
            vec!["a@example.com".to_string(), "b@example.com".to_string()],
            "Subject",
        )
        .with_html("<p>Hi</p>")
        .with_from("shop@example.com");

        assert!(email.is_addressed_to("b@example.com"));
        assert!(!email.is_addressed_to("c@example.com"));
        assert_eq!(email.recipients(), "a@example.com,b@example.com");
        assert_eq!(email.from.as_deref(), Some("shop@example.com"));
        assert!(email.body_text.is_none());
    }

    #[test]
    fn test_each_email_gets_its_own_id() {
        let a = Email::new("a@example.com", "One");
        let b = Email::new("a@example.com", "One");
        assert_ne!(a.id, b.id);
    }
}
