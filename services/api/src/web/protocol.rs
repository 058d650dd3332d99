//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser page and the API server.
//! One connection is one mounted page.

use comment_wall_core::{PanelSnapshot, ProbeStatus};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The comment input changed. Sent on every edit, like a controlled input.
    UpdateDraft { content: String },

    /// Submit the current draft.
    SubmitComment,

    /// Load (or reload) today's comments.
    FetchTodaysComments,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The connectivity probe state; `checking` first, then the result.
    ConnectionStatus { status: String, text: String },

    /// The full comment panel after a state transition.
    PanelUpdated { panel: PanelSnapshot },

    /// The client sent something the server could not understand.
    Error { message: String },
}

impl From<&ProbeStatus> for ServerMessage {
    fn from(status: &ProbeStatus) -> Self {
        Self::ConnectionStatus {
            status: status.kind().to_string(),
            text: status.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "protocol_test.rs"]
mod tests;
