//! crates/comment_wall_core/src/probe.rs
//!
//! The one-shot connectivity check run when a page is mounted.

use std::fmt;

use tracing::{error, info};

use crate::domain::COMMENTS_TABLE;
use crate::ports::{CommentStore, PortError};

/// What the page shows about the backend connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The probe has not resolved yet.
    Checking,
    Connected,
    BackendError(String),
    Unexpected(String),
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking database connection..."),
            Self::Connected => write!(f, "Hello World! Database connection successful."),
            Self::BackendError(description) => write!(
                f,
                "Database connection error: {description}. (Table: '{COMMENTS_TABLE}')"
            ),
            Self::Unexpected(description) => write!(f, "Unexpected error: {description}"),
        }
    }
}

impl ProbeStatus {
    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Connected => "connected",
            Self::BackendError(_) => "backend_error",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

/// Runs a single existence check against the comments collection. Never retries.
pub async fn probe_connection(store: &dyn CommentStore) -> ProbeStatus {
    match store.probe().await {
        Ok(()) => {
            info!("Connectivity probe succeeded.");
            ProbeStatus::Connected
        }
        Err(PortError::Backend(description)) => {
            error!("Backend reported an error during the connectivity probe: {}", description);
            ProbeStatus::BackendError(description)
        }
        Err(PortError::Unexpected(description)) => {
            error!("Connectivity probe failed: {}", description);
            ProbeStatus::Unexpected(description)
        }
    }
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
