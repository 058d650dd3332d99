//! services/api/src/web/ws_handler.rs
//!
//! The WebSocket entry point. One connection is one mounted page; this module
//! only moves JSON frames between the socket and the `Page`.

use crate::{
    error::ApiError,
    web::{page::Page, protocol::ServerMessage, state::AppState},
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{future, SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New page connection established.");

    let (sender, mut receiver) = socket.split();
    let sink = sender.with(|msg: ServerMessage| future::ready(encode(&msg)));

    let page = match Page::mount(&app_state, sink).await {
        Ok(page) => page,
        Err(e) => {
            error!("Failed to send initial page state: {}", e);
            return;
        }
    };

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => page.handle_text(text.as_str()).await,
            Ok(Message::Close(_)) => {
                info!("Client sent close message.");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("WebSocket receive failed: {}", e);
                break;
            }
        }
    }

    page.unmount();
    info!("Page connection closed.");
}

fn encode(msg: &ServerMessage) -> Result<Message, ApiError> {
    let json = serde_json::to_string(msg)?;
    Ok(Message::Text(json.into()))
}
