//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use comment_wall_core::{Clock, CommentPanel, CommentStore, PanelSnapshot};
use futures::channel::mpsc::UnboundedSender;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CommentStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates the comment panel for one freshly mounted page. Every state
    /// transition of the panel is published to `updates`.
    pub fn mount_panel(&self, updates: UnboundedSender<PanelSnapshot>) -> Arc<CommentPanel> {
        let panel = CommentPanel::new(self.store.clone(), self.clock.clone()).with_listener(updates);
        Arc::new(panel)
    }
}
