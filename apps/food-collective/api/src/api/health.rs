//! Readiness check backed by the email provider.

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_orders::OrderNotifier;
use email::EmailProvider;

/// `GET /ready`: 503 until the email provider is usable
pub async fn ready_handler<P: EmailProvider + 'static>(
    State(notifier): State<OrderNotifier<P>>,
) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "email_provider",
        Box::pin(async {
            notifier
                .check_provider()
                .await
                .map_err(|e| format!("{} check failed: {}", notifier.provider_name(), e))
        }),
    )];

    run_health_checks(checks).await
}

pub fn ready_router<P: EmailProvider + 'static>(notifier: OrderNotifier<P>) -> Router {
    Router::new()
        .route("/ready", get(ready_handler::<P>))
        .with_state(notifier)
}
