//! Connection registry: the single owner of every live browser connection.
//!
//! WebSocket creation happens in the UI layer; the registry receives the
//! `UnboundedSender` feeding each connection's writer task and is the only
//! component that holds or iterates connections. All mutation of the
//! connection set goes through one lock, which is the only shared mutable
//! state in the bridge.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common::time::Clock;
use crate::domain::{BroadcastHandle, ChatBroadcaster, ChatMessage, ConnectionId};
use crate::infrastructure::dto::websocket::ChatFrame;

/// Greeting pushed to a connection right after it registers.
const GREETING: &str = "Connected to chat relay";

struct ClientHandle {
    sender: BroadcastHandle,
}

/// In-process implementation of [`ChatBroadcaster`].
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ClientHandle>>,
    clock: Arc<dyn Clock>,
}

impl ConnectionRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn serialize(message: &ChatMessage) -> String {
        // ChatFrame has no map keys or non-string keys, so serialization
        // cannot fail; fall back to an empty object rather than panicking.
        serde_json::to_string(&ChatFrame::from(message)).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize chat frame: {}", e);
            "{}".to_string()
        })
    }
}

#[async_trait]
impl ChatBroadcaster for ConnectionRegistry {
    async fn register(&self, sender: BroadcastHandle) -> ConnectionId {
        let id = ConnectionId::generate();
        let greeting = ChatMessage::system(GREETING, self.clock.now_millis());

        let mut connections = self.connections.lock().await;
        // Greet this connection only; other clients are not told about it.
        if sender.send(Self::serialize(&greeting)).is_err() {
            tracing::warn!("Connection '{}' closed before greeting was sent", id);
        }
        connections.insert(id, ClientHandle { sender });
        tracing::info!(
            "Connection '{}' registered ({} total)",
            id,
            connections.len()
        );
        id
    }

    async fn unregister(&self, id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if connections.remove(id).is_some() {
            tracing::info!(
                "Connection '{}' unregistered ({} remaining)",
                id,
                connections.len()
            );
        }
    }

    async fn broadcast(&self, message: &ChatMessage) -> usize {
        // Serialize once, send to everyone.
        let frame = Self::serialize(message);

        let mut connections = self.connections.lock().await;
        let mut dead: Vec<ConnectionId> = Vec::new();
        let mut delivered = 0;

        for (id, handle) in connections.iter() {
            if handle.sender.send(frame.clone()).is_err() {
                // A failed send means the writer task is gone. Drop the
                // connection and keep going; one dead receiver must not
                // fail the whole broadcast.
                tracing::warn!("Failed to send to connection '{}', pruning", id);
                dead.push(*id);
            } else {
                delivered += 1;
            }
        }
        for id in dead {
            connections.remove(&id);
        }

        tracing::debug!(
            "Broadcast '{}' message to {} connections",
            message.kind.as_str(),
            delivered
        );
        delivered
    }

    async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }
}
