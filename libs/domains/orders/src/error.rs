use crate::models::{EmailKind, OrderResponse};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use email::NotificationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    /// Body was not valid JSON or lacked a required field
    #[error("Invalid order payload: {0}")]
    InvalidPayload(String),

    #[error("Failed to render {kind} email: {message}")]
    Render { kind: EmailKind, message: String },

    /// A required (admin or customer) send failed
    #[error("Failed to send {kind} email: {source}")]
    Delivery {
        kind: EmailKind,
        #[source]
        source: NotificationError,
    },
}

pub type OrderResult<T> = Result<T, OrderError>;

impl OrderError {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::InvalidPayload(_) => "invalid_payload",
            OrderError::Render { .. } => "render",
            OrderError::Delivery { .. } => "delivery",
        }
    }
}

/// Every failure answers `500 {"success":false,"error":"Failed to send emails"}`;
/// the detail stays in the server log.
impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        match &self {
            OrderError::Delivery { kind, source } => {
                tracing::error!(
                    error_kind = self.kind(),
                    email_kind = %kind,
                    provider_status = ?source.status(),
                    provider_body = source.response_body().unwrap_or_default(),
                    "Email Error: {}",
                    self
                );
            }
            _ => {
                tracing::error!(error_kind = self.kind(), "Email Error: {}", self);
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(OrderResponse::failed()),
        )
            .into_response()
    }
}
