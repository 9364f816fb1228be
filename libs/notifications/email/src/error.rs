//! Error types for email delivery.

use std::time::Duration;
use thiserror::Error;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur while building or delivering an email.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Provider is not usable with the current configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The message itself cannot be sent (no recipients, no content, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider rejected the request or could not be reached
    #[error("Provider error: {message}")]
    Provider {
        /// HTTP status returned by the provider, if a response arrived
        status: Option<u16>,
        message: String,
        /// Raw response body, kept for diagnostics
        body: Option<String>,
    },

    /// The provider did not answer within the configured bound
    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl NotificationError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Response body returned by the provider alongside an error, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Provider { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// HTTP status returned by the provider alongside an error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NotificationError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_body_only_for_provider_errors() {
        let err = NotificationError::Provider {
            status: Some(400),
            message: "invalid request".to_string(),
            body: Some(r#"{"errors":[{"message":"bad from"}]}"#.to_string()),
        };
        assert_eq!(err.status(), Some(400));
        assert!(err.response_body().unwrap().contains("bad from"));

        let err = NotificationError::Timeout(Duration::from_secs(5));
        assert!(err.response_body().is_none());
        assert!(err.to_string().contains("timed out"));
    }
}
