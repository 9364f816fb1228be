//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers

pub mod cors;
pub mod security;

pub use cors::{cors_layer_from_origins, create_cors_layer, create_permissive_cors_layer};
pub use security::security_headers;
