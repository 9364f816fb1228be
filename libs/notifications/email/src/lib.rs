//! Transactional email library
//!
//! ## Components
//!
//! - **Email Models**: [`Email`], the provider-neutral message
//! - **Providers**: [`EmailProvider`] capability with SendGrid and Mock implementations
//! - **Templates**: Handlebars-based [`TemplateEngine`] with HTML escaping
//!
//! ## Usage
//!
//! ```ignore
//! use email::{Email, EmailProvider, SendGridConfig, SendGridProvider};
//!
//! let provider = SendGridProvider::new(SendGridConfig::new(api_key));
//! let email = Email::new("ama@example.com", "Order Confirmation")
//!     .with_from("orders@example.com")
//!     .with_html("<h1>Thank you!</h1>");
//! provider.send(&email).await?;
//! ```

pub mod error;
pub mod models;
pub mod provider;
pub mod templates;

pub use error::{NotificationError, NotificationResult};
pub use models::Email;
pub use provider::{
    EmailProvider, MockEmailProvider, SendGridConfig, SendGridProvider, SendResult,
};
pub use templates::{EmailTemplate, RenderedTemplate, TemplateEngine};
