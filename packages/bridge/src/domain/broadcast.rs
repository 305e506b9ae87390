//! Fan-out seam between the use cases and the live WebSocket feed.

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::ChatMessage;

/// Opaque identity of one registered browser connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Sender half of the channel feeding one connection's socket writer task.
pub type BroadcastHandle = mpsc::UnboundedSender<String>;

/// Fan-out of chat messages to all connected browsers.
///
/// The implementation owns every connection exclusively; callers never see
/// or iterate the connection set. A single receiver failing must never fail
/// the whole broadcast, so `broadcast` is infallible and reports only how
/// many connections a frame was delivered to.
#[async_trait]
pub trait ChatBroadcaster: Send + Sync {
    /// Add a connection and greet it with a system message.
    async fn register(&self, sender: BroadcastHandle) -> ConnectionId;

    /// Remove a connection. Idempotent; safe after the connection is gone.
    async fn unregister(&self, id: &ConnectionId);

    /// Deliver one message to every registered connection, pruning any
    /// connection whose send fails. Returns the number of deliveries.
    async fn broadcast(&self, message: &ChatMessage) -> usize;

    /// Number of currently registered connections.
    async fn connection_count(&self) -> usize;
}
