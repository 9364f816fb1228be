//! The Food Collective backend: accepts checkout orders and emails the
//! business owners, the customer and each vendor through SendGrid.

use axum::{Router, middleware};
use axum_helpers::server::{create_app, create_router};
use core_config::{
    AppInfo, Environment,
    tracing::{init_tracing, install_color_eyre},
};
use domain_orders::OrderNotifier;
use email::{EmailProvider, SendGridProvider};
use observability::{init_metrics, metrics_middleware};
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod api;
pub mod config;
pub mod openapi;

use config::Config;

/// Assemble the full HTTP application around a notifier.
pub fn build_router<P: EmailProvider + 'static>(
    notifier: OrderNotifier<P>,
    app_info: AppInfo,
    cors_layer: CorsLayer,
) -> Router {
    let routes = api::service_routes(notifier.clone(), app_info);
    let apis = api::routes(notifier);

    create_router::<openapi::ApiDoc>(routes, apis, cors_layer)
        .layer(middleware::from_fn(metrics_middleware))
}

/// Load configuration from the environment and serve until shutdown.
pub async fn run() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Tracing before the rest of the config so its warnings reach the log
    init_tracing(&Environment::from_env());
    let config = Config::from_env()?;
    config.log_startup_warnings();
    init_metrics()?;

    let provider = SendGridProvider::new(config.sendgrid.clone());
    let notifier = OrderNotifier::new(provider, config.notifier.clone())?;
    let cors_layer = axum_helpers::cors_layer_from_origins(config.cors_origins.as_deref())?;

    info!(
        admins = notifier.config().business_owner_emails.len(),
        sender = %notifier.config().sender_email,
        provider = notifier.provider_name(),
        "Order notifications configured"
    );

    let router = build_router(notifier, config.app, cors_layer);

    create_app(router, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("{} shutdown complete", config.app.name);
    Ok(())
}
