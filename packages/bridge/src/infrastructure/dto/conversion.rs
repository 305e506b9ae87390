//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, MessageKind};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&ChatMessage> for dto::ChatFrame {
    fn from(message: &ChatMessage) -> Self {
        let frame_type = match message.kind {
            MessageKind::System => dto::FrameType::System,
            _ => dto::FrameType::Chat,
        };
        Self {
            r#type: frame_type,
            player: message.author.clone(),
            message: message.body.clone(),
            timestamp: message.occurred_at,
            message_type: message.kind.as_str().to_string(),
        }
    }
}
