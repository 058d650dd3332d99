//! services/api/src/web/page.rs
//!
//! One mounted page, independent of the transport it talks over.
//!
//! Mounting sends `connection_status { checking }` and the initial panel, then
//! starts the connectivity check and a task forwarding every panel transition.
//! Each user action is spawned on its own, so overlapping actions interleave
//! the way they do in the browser.

use crate::web::{
    protocol::{ClientMessage, ServerMessage},
    state::AppState,
};
use comment_wall_core::{probe_connection, CommentPanel, ProbeStatus};
use futures::{channel::mpsc, Sink, SinkExt, StreamExt};
use std::{fmt::Display, sync::Arc};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, error, info, warn};

pub struct Page<S> {
    panel: Arc<CommentPanel>,
    sink: Arc<Mutex<S>>,
    forward_task: JoinHandle<()>,
}

impl<S> Page<S>
where
    S: Sink<ServerMessage> + Unpin + Send + 'static,
    S::Error: Display + Send,
{
    /// Mounts a fresh page whose messages go to `sink`.
    pub async fn mount(app_state: &AppState, sink: S) -> Result<Self, S::Error> {
        let sink = Arc::new(Mutex::new(sink));
        let (updates_tx, mut updates_rx) = mpsc::unbounded();
        let panel = app_state.mount_panel(updates_tx);

        send(&sink, ServerMessage::from(&ProbeStatus::Checking)).await?;
        send(
            &sink,
            ServerMessage::PanelUpdated {
                panel: panel.snapshot(),
            },
        )
        .await?;

        let forward_task = {
            let sink = sink.clone();
            tokio::spawn(async move {
                while let Some(snapshot) = updates_rx.next().await {
                    let msg = ServerMessage::PanelUpdated { panel: snapshot };
                    if let Err(e) = send(&sink, msg).await {
                        warn!("Stopped forwarding panel updates: {}", e);
                        break;
                    }
                }
            })
        };

        {
            let store = app_state.store.clone();
            let sink = sink.clone();
            tokio::spawn(async move {
                let status = probe_connection(store.as_ref()).await;
                if let Err(e) = send(&sink, ServerMessage::from(&status)).await {
                    error!("Failed to send connection status: {}", e);
                }
            });
        }

        Ok(Self {
            panel,
            sink,
            forward_task,
        })
    }

    /// Dispatches one text frame from the client.
    pub async fn handle_text(&self, text: &str) {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(ClientMessage::UpdateDraft { content }) => {
                self.panel.set_draft(content);
            }
            Ok(ClientMessage::SubmitComment) => {
                info!("SubmitComment message received.");
                let panel = self.panel.clone();
                tokio::spawn(async move {
                    let outcome = panel.submit().await;
                    debug!("Submit finished: {:?}", outcome);
                });
            }
            Ok(ClientMessage::FetchTodaysComments) => {
                info!("FetchTodaysComments message received.");
                let panel = self.panel.clone();
                tokio::spawn(async move {
                    let outcome = panel.fetch_today().await;
                    debug!("Fetch finished: {:?}", outcome);
                });
            }
            Err(e) => {
                warn!("Failed to deserialize client message: {}", e);
                let msg = ServerMessage::Error {
                    message: format!("Unrecognized message: {}", e),
                };
                if let Err(e) = send(&self.sink, msg).await {
                    error!("Failed to send error message: {}", e);
                }
            }
        }
    }

    /// Stops forwarding panel updates. Actions already in flight run to
    /// completion; their updates have nowhere to go.
    pub fn unmount(self) {
        self.forward_task.abort();
    }
}

async fn send<S>(sink: &Arc<Mutex<S>>, msg: ServerMessage) -> Result<(), S::Error>
where
    S: Sink<ServerMessage> + Unpin,
{
    sink.lock().await.send(msg).await
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
