//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `CommentStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.
//!
//! The `comments` table is provisioned outside this service:
//! `id uuid` and `created_at timestamptz` are filled by column defaults.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use comment_wall_core::domain::{Comment, NewComment};
use comment_wall_core::ports::{CommentStore, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `CommentStore` port.
#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    /// Creates a new `PgCommentStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct CommentRecord {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}
impl CommentRecord {
    fn to_domain(self) -> Comment {
        Comment {
            id: self.id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// Errors the database itself reported keep their message; everything else
/// (pool, I/O, decoding) is unexpected.
pub fn map_sqlx_error(e: sqlx::Error) -> PortError {
    match e {
        sqlx::Error::Database(db_err) => PortError::Backend(db_err.message().to_string()),
        other => PortError::Unexpected(other.to_string()),
    }
}

//=========================================================================================
// `CommentStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn probe(&self) -> PortResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("Probe counted {} comments.", count);
        Ok(())
    }

    async fn insert_comment(&self, comment: &NewComment) -> PortResult<()> {
        sqlx::query("INSERT INTO comments (content) VALUES ($1)")
            .bind(comment.content())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn list_comments_since(&self, since: DateTime<Utc>) -> PortResult<Vec<Comment>> {
        let records = sqlx::query_as::<_, CommentRecord>(
            "SELECT id, content, created_at FROM comments WHERE created_at >= $1 ORDER BY created_at DESC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let comments = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(comments)
    }
}

#[cfg(test)]
#[path = "db_test.rs"]
mod tests;
