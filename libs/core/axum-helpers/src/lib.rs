//! # Axum Helpers
//!
//! Utilities and middleware shared by the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router composition, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: JSON fallback responses
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use axum_helpers::http::create_permissive_cors_layer;
//! use core_config::{app_info, server::ServerConfig};
//!
//! let routes = Router::new().merge(health_router(app_info!()));
//! let router = create_router::<ApiDoc>(routes, api_routes, create_permissive_cors_layer());
//! create_app(router, &ServerConfig::default()).await?;
//! ```

pub mod errors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, create_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

pub use http::{
    cors_layer_from_origins, create_cors_layer, create_permissive_cors_layer, security_headers,
};

pub use errors::ErrorResponse;
