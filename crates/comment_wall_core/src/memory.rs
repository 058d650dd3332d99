//! crates/comment_wall_core/src/memory.rs
//!
//! An in-process `CommentStore` for local development and tests. It honors the
//! same contract as the database adapter. A store built with `recording` also
//! keeps a log of the arguments of every call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::{Comment, NewComment};
use crate::ports::{CommentStore, PortError, PortResult};

#[derive(Default)]
struct Inner {
    rows: Vec<Comment>,
    inserts: Vec<String>,
    queries: Vec<DateTime<Utc>>,
    probes: usize,
    calls: usize,
    failure: Option<PortError>,
}

pub struct MemoryCommentStore {
    clock: Arc<dyn Clock>,
    record: bool,
    inner: Mutex<Inner>,
}

impl MemoryCommentStore {
    /// Creates an empty store that stamps inserts with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            record: false,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Like `new`, but keeps the arguments of every insert and query so they
    /// can be read back with `inserted` and `queries`.
    pub fn recording(clock: Arc<dyn Clock>) -> Self {
        Self {
            record: true,
            ..Self::new(clock)
        }
    }

    /// Seeds the store with already persisted rows.
    pub fn with_rows(self, rows: Vec<Comment>) -> Self {
        self.lock().rows = rows;
        self
    }

    /// Makes every subsequent call fail with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<PortError>) {
        self.lock().failure = error;
    }

    /// Contents passed to `insert_comment`, in call order. Empty unless recording.
    pub fn inserted(&self) -> Vec<String> {
        self.lock().inserts.clone()
    }

    /// `since` bounds passed to `list_comments_since`, in call order. Empty unless recording.
    pub fn queries(&self) -> Vec<DateTime<Utc>> {
        self.lock().queries.clone()
    }

    pub fn probe_count(&self) -> usize {
        self.lock().probes
    }

    /// Total number of backend calls, successful or not.
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn probe(&self) -> PortResult<()> {
        let mut inner = self.lock();
        inner.probes += 1;
        inner.calls += 1;
        match &inner.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn insert_comment(&self, comment: &NewComment) -> PortResult<()> {
        let created_at = self.clock.now().with_timezone(&Utc);
        let mut inner = self.lock();
        inner.calls += 1;
        if self.record {
            inner.inserts.push(comment.content().to_string());
        }
        if let Some(e) = &inner.failure {
            return Err(e.clone());
        }
        inner.rows.push(Comment {
            id: Uuid::new_v4(),
            content: comment.content().to_string(),
            created_at,
        });
        Ok(())
    }

    async fn list_comments_since(&self, since: DateTime<Utc>) -> PortResult<Vec<Comment>> {
        let mut inner = self.lock();
        inner.calls += 1;
        if self.record {
            inner.queries.push(since);
        }
        if let Some(e) = &inner.failure {
            return Err(e.clone());
        }
        let mut rows: Vec<Comment> = inner
            .rows
            .iter()
            .filter(|c| c.created_at >= since)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
