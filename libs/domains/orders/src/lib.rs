//! Orders Domain
//!
//! Turns a submitted order into the emails The Food Collective sends for it:
//! an alert to the business owners, a receipt to the customer and one notice
//! per fulfilling vendor.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /create-order
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Notifier   │  ← required sends, concurrent vendor fan-out, timeouts
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Renderer   │  ← Handlebars templates per recipient
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Provider   │  ← SendGrid in production, mock in tests
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_orders::{NotifierConfig, OrderNotifier, handlers};
//! use email::{SendGridConfig, SendGridProvider};
//!
//! # fn example() -> eyre::Result<()> {
//! let provider = SendGridProvider::new(SendGridConfig::from_env()?);
//! let notifier = OrderNotifier::new(provider, NotifierConfig::from_env()?)?;
//! let router = handlers::router(notifier);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;
pub mod service;

pub use config::NotifierConfig;
pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{
    Customer, EmailKind, LineItem, Order, OrderResponse, OrderSubmission, VendorNotification,
    VendorRef,
};
pub use render::{OrderEmailRenderer, OrderEmails, VendorEmail};
pub use service::{DispatchReport, OrderNotifier, VendorOutcome};
