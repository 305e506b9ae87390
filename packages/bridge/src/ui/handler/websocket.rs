//! WebSocket live-feed handler.
//!
//! WebSocket creation happens here; from the moment the handshake
//! completes the connection belongs to the `ChatBroadcaster`, which is the
//! only component that may send to it. This handler just pumps the
//! registry's channel into the socket and logs whatever the client sends.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::ui::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Channel feeding this connection's writer task; the registry owns the
    // sender half from here on.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let connection_id = state.broadcaster.register(tx).await;

    // Forward broadcast frames to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // Drain inbound frames. Clients currently have nothing to say to the
    // bridge over the socket, so inbound traffic is logged and dropped.
    let id_for_recv = connection_id;
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", id_for_recv, e);
                    break;
                }
            };
            match msg {
                Message::Text(text) => {
                    tracing::info!("Received frame from '{}': {}", id_for_recv, text);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", id_for_recv);
                    break;
                }
                // Ping/pong is handled by the protocol layer
                _ => {}
            }
        }
    });

    // If either task completes, the connection is done; abort the other.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.broadcaster.unregister(&connection_id).await;
}
