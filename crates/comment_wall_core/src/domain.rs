//! crates/comment_wall_core/src/domain.rs
//!
//! Defines the pure, core data structures for the comment wall.
//! These structs are independent of any database or transport.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The name of the backend collection holding comment records.
pub const COMMENTS_TABLE: &str = "comments";

/// Upper bound on the length of a comment, counted in characters.
pub const COMMENT_MAX_CHARS: usize = 500;

/// A persisted comment. `id` and `created_at` are always assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creation time in the local timezone, as `HH:MM`.
    pub fn local_time_label(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

/// The insert payload. Only the content is ever client-supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    content: String,
}

impl NewComment {
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The result of checking a draft before it may be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftCheck {
    /// Nothing but whitespace; submitting is a silent no-op.
    Blank,
    /// Longer than [`COMMENT_MAX_CHARS`].
    TooLong { chars: usize },
    Ready(NewComment),
}

/// Validates a draft. The content of a `Ready` comment is the draft as typed,
/// untrimmed.
pub fn validate_draft(draft: &str) -> DraftCheck {
    if draft.trim().is_empty() {
        return DraftCheck::Blank;
    }
    let chars = draft.chars().count();
    if chars > COMMENT_MAX_CHARS {
        return DraftCheck::TooLong { chars };
    }
    DraftCheck::Ready(NewComment {
        content: draft.to_string(),
    })
}

#[cfg(test)]
#[path = "domain_test.rs"]
mod tests;
