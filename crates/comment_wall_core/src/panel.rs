//! crates/comment_wall_core/src/panel.rs
//!
//! The comment panel: a draft, two advisory in-flight flags, a message line
//! and the list of today's comments. Each page mount owns one panel.
//!
//! State lives behind a mutex that is only held for the synchronous part of a
//! transition, never across a backend call. Nothing stops a second `submit` or
//! `fetch_today` from starting while one is in flight; the flags only tell the
//! client to disable its controls.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::channel::mpsc::UnboundedSender;
use serde::Serialize;
use tracing::{debug, error};

use crate::clock::{start_of_local_day, Clock};
use crate::domain::{validate_draft, Comment, DraftCheck, COMMENTS_TABLE, COMMENT_MAX_CHARS};
use crate::ports::CommentStore;

pub const SUBMIT_SUCCESS: &str = "Comment submitted successfully!";
pub const NO_COMMENTS_TODAY: &str = "No comments found for today.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// The single message line under the panel controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

#[derive(Debug, Clone, Default)]
struct PanelState {
    draft: String,
    is_submitting: bool,
    is_fetching: bool,
    notice: Option<Notice>,
    comments: Vec<Comment>,
}

/// A point-in-time copy of the panel, as sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSnapshot {
    pub draft: String,
    pub is_submitting: bool,
    pub is_fetching: bool,
    /// Whether the submit control should be enabled.
    pub can_submit: bool,
    pub max_chars: usize,
    pub notice: Option<Notice>,
    pub comments: Vec<Comment>,
}

impl From<&PanelState> for PanelSnapshot {
    fn from(state: &PanelState) -> Self {
        Self {
            draft: state.draft.clone(),
            is_submitting: state.is_submitting,
            is_fetching: state.is_fetching,
            can_submit: !state.is_submitting && !state.draft.trim().is_empty(),
            max_chars: COMMENT_MAX_CHARS,
            notice: state.notice.clone(),
            comments: state.comments.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft was blank; nothing happened.
    Ignored,
    /// The draft was over the length limit; no backend call was made.
    Rejected,
    /// The insert succeeded. `refreshed` is true when the list was re-fetched.
    Submitted { refreshed: bool },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded { count: usize },
    Failed,
}

pub struct CommentPanel {
    store: Arc<dyn CommentStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<PanelState>,
    listener: Option<UnboundedSender<PanelSnapshot>>,
}

impl CommentPanel {
    pub fn new(store: Arc<dyn CommentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: Mutex::new(PanelState::default()),
            listener: None,
        }
    }

    /// Publishes a snapshot to `listener` after every state transition.
    pub fn with_listener(mut self, listener: UnboundedSender<PanelSnapshot>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot::from(&*self.lock())
    }

    /// Replaces the draft, as the input control does on every keystroke.
    pub fn set_draft(&self, draft: impl Into<String>) {
        let draft = draft.into();
        self.update(|state| state.draft = draft);
    }

    /// Validates the draft and, if it passes, inserts it as a new comment.
    ///
    /// On success the draft is cleared and, when the list is already showing
    /// comments, the list is re-fetched once the insert has resolved.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = self.lock().draft.clone();
        let comment = match validate_draft(&draft) {
            DraftCheck::Blank => return SubmitOutcome::Ignored,
            DraftCheck::TooLong { chars } => {
                debug!("Rejected a {}-character comment before sending it.", chars);
                self.update(|state| {
                    state.notice = Some(Notice::error(format!(
                        "Error: Comment must be {COMMENT_MAX_CHARS} characters or less."
                    )));
                });
                return SubmitOutcome::Rejected;
            }
            DraftCheck::Ready(comment) => comment,
        };

        self.update(|state| {
            state.is_submitting = true;
            state.notice = None;
        });

        let result = self.store.insert_comment(&comment).await;

        let refresh = self.update(|state| {
            let refresh = match &result {
                Ok(()) => {
                    state.draft.clear();
                    state.notice = Some(Notice::success(SUBMIT_SUCCESS));
                    !state.comments.is_empty()
                }
                Err(e) => {
                    state.notice = Some(Notice::error(format!(
                        "Error: {e}. (Table: '{COMMENTS_TABLE}', Column: 'content')"
                    )));
                    false
                }
            };
            state.is_submitting = false;
            refresh
        });

        match result {
            Ok(()) => {
                if refresh {
                    self.fetch_today().await;
                }
                SubmitOutcome::Submitted { refreshed: refresh }
            }
            Err(e) => {
                error!("Failed to insert comment: {:?}", e);
                SubmitOutcome::Failed
            }
        }
    }

    /// Loads every comment created since local midnight, newest first, and
    /// replaces the displayed list with it. A failed load leaves the list as is.
    pub async fn fetch_today(&self) -> FetchOutcome {
        let since = start_of_local_day(self.clock.as_ref());
        self.update(|state| {
            state.is_fetching = true;
            state.notice = None;
        });

        let result = self.store.list_comments_since(since).await;

        self.update(|state| {
            match &result {
                Ok(comments) => {
                    if comments.is_empty() {
                        state.notice = Some(Notice::info(NO_COMMENTS_TODAY));
                    }
                    state.comments = comments.clone();
                }
                Err(e) => {
                    state.notice = Some(Notice::error(format!("Error fetching comments: {e}")));
                }
            }
            state.is_fetching = false;
        });

        match result {
            Ok(comments) => FetchOutcome::Loaded { count: comments.len() },
            Err(e) => {
                error!("Failed to fetch today's comments: {:?}", e);
                FetchOutcome::Failed
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one synchronous transition and publishes the resulting snapshot.
    fn update<R>(&self, apply: impl FnOnce(&mut PanelState) -> R) -> R {
        let (out, snapshot) = {
            let mut state = self.lock();
            let out = apply(&mut state);
            (out, PanelSnapshot::from(&*state))
        };
        if let Some(listener) = &self.listener {
            // A closed receiver means the page is gone; the state is still updated.
            let _ = listener.unbounded_send(snapshot);
        }
        out
    }
}

#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;
