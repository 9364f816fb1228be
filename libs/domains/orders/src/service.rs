//! Order notification service - fans one submission out to every recipient

use email::{Email, EmailProvider, NotificationError, NotificationResult, SendResult};
use futures::future::join_all;
use observability::orders::OrderMetrics;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, Span, error, info, instrument};

use crate::config::NotifierConfig;
use crate::error::{OrderError, OrderResult};
use crate::models::{EmailKind, OrderSubmission, VendorNotification};
use crate::render::{OrderEmailRenderer, VendorEmail};

/// Result of a single vendor notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorOutcome {
    pub vendor: VendorNotification,
    /// Failure description; `None` when the provider accepted the message
    pub error: Option<String>,
}

impl VendorOutcome {
    pub fn is_sent(&self) -> bool {
        self.error.is_none()
    }
}

/// What happened to one successfully dispatched order
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub transaction_ref: String,
    /// One entry per vendor notice, in submission order
    pub vendor_outcomes: Vec<VendorOutcome>,
}

impl DispatchReport {
    pub fn vendors_notified(&self) -> usize {
        self.vendor_outcomes.iter().filter(|o| o.is_sent()).count()
    }

    pub fn vendors_failed(&self) -> usize {
        self.vendor_outcomes.len() - self.vendors_notified()
    }
}

/// Sends the admin alert, the customer receipt and the vendor notices for
/// each order submission.
///
/// The admin and customer emails are required: the first failure aborts the
/// submission. Vendor notices run as independent tasks whose failures are
/// logged and reported but never fail the submission.
pub struct OrderNotifier<P: EmailProvider> {
    provider: Arc<P>,
    renderer: Arc<OrderEmailRenderer>,
    config: Arc<NotifierConfig>,
}

impl<P: EmailProvider> Clone for OrderNotifier<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            renderer: Arc::clone(&self.renderer),
            config: Arc::clone(&self.config),
        }
    }
}

impl<P: EmailProvider + 'static> OrderNotifier<P> {
    pub fn new(provider: P, config: NotifierConfig) -> eyre::Result<Self> {
        Self::from_shared(Arc::new(provider), config)
    }

    /// Build a notifier around a provider that is also used elsewhere
    pub fn from_shared(provider: Arc<P>, config: NotifierConfig) -> eyre::Result<Self> {
        Ok(Self {
            provider,
            renderer: Arc::new(OrderEmailRenderer::new()?),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Name of the underlying email provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Readiness check against the email provider
    pub async fn check_provider(&self) -> NotificationResult<()> {
        self.provider.health_check().await
    }

    /// Render and send every email for one order.
    ///
    /// Vendor notices are started first and run concurrently with the
    /// required sends. If a required send fails the vendor tasks are left to
    /// finish on their own and the error is returned immediately.
    #[instrument(
        skip(self, submission),
        fields(
            transaction_ref = %submission.order.transaction_ref,
            vendors = submission.vendors().len()
        )
    )]
    pub async fn submit_order(&self, submission: OrderSubmission) -> OrderResult<DispatchReport> {
        let started = Instant::now();
        let result = self.dispatch(&submission).await;
        OrderMetrics::record_submission(result.is_ok(), started.elapsed());

        if let Ok(report) = &result {
            info!(
                vendors_notified = report.vendors_notified(),
                vendors_failed = report.vendors_failed(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Order notifications dispatched"
            );
        }
        result
    }

    async fn dispatch(&self, submission: &OrderSubmission) -> OrderResult<DispatchReport> {
        let emails = self.renderer.render(submission, &self.config)?;

        let (vendors, tasks): (Vec<_>, Vec<_>) = emails
            .vendors
            .into_iter()
            .map(|vendor_email| {
                let vendor = vendor_email.vendor.clone();
                let task = tokio::spawn(
                    notify_vendor(
                        Arc::clone(&self.provider),
                        vendor_email,
                        self.config.send_timeout,
                    )
                    .instrument(Span::current()),
                );
                (vendor, task)
            })
            .unzip();

        // Returning early drops the handles, which detaches the vendor tasks.
        self.send_required(EmailKind::Admin, &emails.admin).await?;
        self.send_required(EmailKind::Customer, &emails.customer).await?;

        let vendor_outcomes = vendors
            .into_iter()
            .zip(join_all(tasks).await)
            .map(|(vendor, joined)| {
                joined.unwrap_or_else(|e| {
                    error!(vendor = %vendor.name, error = %e, "Vendor email task failed");
                    VendorOutcome {
                        vendor,
                        error: Some(e.to_string()),
                    }
                })
            })
            .collect();

        Ok(DispatchReport {
            transaction_ref: submission.order.transaction_ref.clone(),
            vendor_outcomes,
        })
    }

    async fn send_required(&self, kind: EmailKind, email: &Email) -> OrderResult<()> {
        let result = deliver(self.provider.as_ref(), email, self.config.send_timeout).await;
        OrderMetrics::record_email(kind.as_str(), result.is_ok());

        let sent = result.map_err(|source| OrderError::Delivery { kind, source })?;
        info!(
            email_kind = %kind,
            to = %email.recipients(),
            message_id = %sent.message_id,
            "Email sent"
        );
        Ok(())
    }
}

async fn notify_vendor<P: EmailProvider>(
    provider: Arc<P>,
    vendor_email: VendorEmail,
    timeout: Duration,
) -> VendorOutcome {
    let VendorEmail { vendor, email } = vendor_email;
    let result = deliver(provider.as_ref(), &email, timeout).await;
    OrderMetrics::record_email(EmailKind::Vendor.as_str(), result.is_ok());

    match result {
        Ok(sent) => {
            info!(
                vendor = %vendor.name,
                to = %vendor.email,
                message_id = %sent.message_id,
                "Email sent to vendor"
            );
            VendorOutcome {
                vendor,
                error: None,
            }
        }
        Err(e) => {
            error!(
                vendor = %vendor.name,
                to = %vendor.email,
                provider_status = ?e.status(),
                provider_body = e.response_body().unwrap_or_default(),
                error = %e,
                "Failed to email vendor"
            );
            VendorOutcome {
                vendor,
                error: Some(e.to_string()),
            }
        }
    }
}

/// One provider call, bounded by `timeout`
async fn deliver<P: EmailProvider + ?Sized>(
    provider: &P,
    email: &Email,
    timeout: Duration,
) -> NotificationResult<SendResult> {
    tokio::time::timeout(timeout, provider.send(email))
        .await
        .unwrap_or(Err(NotificationError::Timeout(timeout)))
}
