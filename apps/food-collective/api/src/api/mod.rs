use axum::{Router, routing::get};
use core_config::AppInfo;
use domain_orders::OrderNotifier;
use email::EmailProvider;

pub mod health;

/// Plain-text liveness message served at `/`
pub const ONLINE_MESSAGE: &str = "The Food Collective Backend is Online and Healthy! 🚀";

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes<P: EmailProvider + 'static>(notifier: OrderNotifier<P>) -> Router {
    domain_orders::handlers::router(notifier)
}

/// Root-level routes: landing message, liveness, readiness and metrics.
pub fn service_routes<P: EmailProvider + 'static>(
    notifier: OrderNotifier<P>,
    app_info: AppInfo,
) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/metrics", get(observability::metrics_handler))
        .merge(axum_helpers::health_router(app_info))
        .merge(health::ready_router(notifier))
}

async fn index() -> &'static str {
    ONLINE_MESSAGE
}
