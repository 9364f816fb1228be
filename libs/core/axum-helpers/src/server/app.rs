use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use super::shutdown::shutdown_signal;
use axum::{middleware, Router};
use core_config::server::ServerConfig;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use utoipa::OpenApi;

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
///
/// # Example
/// ```ignore
/// use core_config::server::ServerConfig;
/// use axum_helpers::server::create_app;
///
/// create_app(router, &ServerConfig::default()).await?;
/// ```
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    info!("Server stopped");
    Ok(())
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - Scalar API reference at `/scalar`, built from `T`
/// - `routes` at the root (health, metrics, landing page)
/// - `apis` nested under `/api`
/// - Common middleware (request tracing, security headers, CORS, compression)
/// - JSON 404 fallback handler
///
/// Both routers must already have their state applied.
///
/// # Example
/// ```ignore
/// let routes = Router::new().route("/", get(index)).merge(health_router(app_info!()));
/// let apis = domain_orders::handlers::router(notifier);
/// let app = create_router::<ApiDoc>(routes, apis, create_permissive_cors_layer());
/// ```
pub fn create_router<T>(routes: Router, apis: Router, cors_layer: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_scalar::{Scalar, Servable as ScalarServable};

    Router::new()
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(routes)
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new())
}
