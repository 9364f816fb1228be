pub mod handlers;

use serde::Serialize;

/// Error body for requests that never reach a domain handler.
///
/// Domain routers answer with their own response types; this one only
/// covers framework-level failures such as unknown paths.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}
