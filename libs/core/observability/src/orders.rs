//! Order-notification metrics.

use metrics::{counter, histogram};
use std::time::Duration;

/// Outcome label for a submission or a single email
pub const OUTCOME_SUCCESS: &str = "success";
pub const OUTCOME_FAILURE: &str = "failure";

fn outcome(ok: bool) -> &'static str {
    if ok { OUTCOME_SUCCESS } else { OUTCOME_FAILURE }
}

/// Order notification metrics recorder
pub struct OrderMetrics;

impl OrderMetrics {
    /// Record one order submission and how long the whole dispatch took
    pub fn record_submission(ok: bool, elapsed: Duration) {
        counter!("order_submissions_total", "outcome" => outcome(ok)).increment(1);
        histogram!("order_dispatch_duration_seconds", "outcome" => outcome(ok))
            .record(elapsed.as_secs_f64());
    }

    /// Record a single email send; `kind` is admin, customer or vendor
    pub fn record_email(kind: &str, ok: bool) {
        counter!(
            "order_emails_total",
            "kind" => kind.to_string(),
            "outcome" => outcome(ok)
        )
        .increment(1);
    }
}
