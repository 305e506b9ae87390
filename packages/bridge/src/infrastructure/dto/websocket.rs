//! WebSocket live-feed frames.

use serde::{Deserialize, Serialize};

/// Frame category pushed to browsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    Chat,
    System,
}

/// One frame on the live feed.
///
/// `message_type` carries the finer-grained event kind (chat/system/join/
/// leave) that browsers use for styling, while `type` only distinguishes
/// chat traffic from bridge-generated notices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFrame {
    pub r#type: FrameType,
    pub player: String,
    pub message: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    #[serde(rename = "messageType")]
    pub message_type: String,
}
