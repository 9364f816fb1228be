//! Server infrastructure module.
//!
//! This module provides:
//! - Router composition with API documentation and common middleware
//! - Health and readiness helpers
//! - Graceful shutdown on SIGINT/SIGTERM

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
