//! Chat message entity.

/// Author used when the originating event carries no player identity.
pub const SERVER_AUTHOR: &str = "Server";

/// What kind of chat activity a message represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Chat,
    System,
    Join,
    Leave,
}

impl MessageKind {
    /// Map the free-form `type` field of a game event onto a kind.
    ///
    /// Unknown or absent types are treated as plain chat, which is what the
    /// game server sends for the overwhelming majority of events.
    pub fn from_event_type(event_type: Option<&str>) -> Self {
        match event_type {
            Some("system") => MessageKind::System,
            Some("join") => MessageKind::Join,
            Some("leave") | Some("quit") => MessageKind::Leave,
            _ => MessageKind::Chat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Chat => "chat",
            MessageKind::System => "system",
            MessageKind::Join => "join",
            MessageKind::Leave => "leave",
        }
    }
}

/// Which side of the bridge a message originated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    /// Pushed by the game server over the webhook.
    Game,
    /// Sent by a browser client and already delivered in-game.
    Web,
}

/// One chat event flowing through the bridge.
///
/// Immutable after construction and discarded once broadcast; the bridge
/// keeps no chat history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub kind: MessageKind,
    pub author: String,
    pub body: String,
    /// Unix timestamp in milliseconds.
    pub occurred_at: i64,
    pub source: MessageSource,
}

impl ChatMessage {
    pub fn new(
        kind: MessageKind,
        author: String,
        body: String,
        occurred_at: i64,
        source: MessageSource,
    ) -> Self {
        Self {
            kind,
            author,
            body,
            occurred_at,
            source,
        }
    }

    /// A server-authored system notice (e.g. the greeting pushed to a
    /// freshly registered connection).
    pub fn system(body: impl Into<String>, occurred_at: i64) -> Self {
        Self::new(
            MessageKind::System,
            SERVER_AUTHOR.to_string(),
            body.into(),
            occurred_at,
            MessageSource::Web,
        )
    }
}
