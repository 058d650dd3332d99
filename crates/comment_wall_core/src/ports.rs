//! crates/comment_wall_core/src/ports.rs
//!
//! Defines the service contract for the comment backend.
//! This trait forms the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete data service behind it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, NewComment};

//=========================================================================================
// Port Error and Result Types
//=========================================================================================

/// The two kinds of failure a backend call can end in.
///
/// Both display as their bare description so callers can embed them in
/// user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The backend answered with a structured error (missing table, constraint, ...).
    #[error("{0}")]
    Backend(String),
    /// Anything else: network, decoding, runtime.
    #[error("{0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Count-only existence check against the comments collection. No rows are returned.
    async fn probe(&self) -> PortResult<()>;

    /// Inserts a single record carrying only its content.
    async fn insert_comment(&self, comment: &NewComment) -> PortResult<()>;

    /// Returns every comment with `created_at >= since`, newest first.
    async fn list_comments_since(&self, since: DateTime<Utc>) -> PortResult<Vec<Comment>>;
}
