//! services/api/src/error.rs
//!
//! Errors that can stop the service or a page connection. Failures from the
//! comment store never reach this type: they are turned into page messages or
//! HTTP responses where the call is made.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Building the connection pool failed (for example a malformed `DATABASE_URL`).
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Writing to the page's WebSocket failed.
    #[error("WebSocket Error: {0}")]
    Websocket(#[from] axum::Error),

    /// A server message could not be encoded as JSON.
    #[error("Encoding Error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Binding or serving the listener failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
