//! HTTP request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::SERVER_AUTHOR;

/// The `player` field of a webhook event.
///
/// The game server's push plugin sends either a bare player name or a
/// structured object carrying a display name, account name and uuid.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlayerField {
    Name(String),
    Object {
        #[serde(default, alias = "displayName")]
        display_name: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        uuid: Option<String>,
    },
}

/// Game-originated event pushed to `POST /chat/webhook`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub player: Option<PlayerField>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
}

impl WebhookPayload {
    /// Canonical author name, with precedence: explicit display name,
    /// then account name, then the literal server author.
    pub fn author(&self) -> String {
        match &self.player {
            Some(PlayerField::Name(name)) => name.clone(),
            Some(PlayerField::Object {
                display_name, name, ..
            }) => display_name
                .clone()
                .or_else(|| name.clone())
                .unwrap_or_else(|| SERVER_AUTHOR.to_string()),
            None => SERVER_AUTHOR.to_string(),
        }
    }
}

/// Browser request body for `POST /chat/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub message: String,
}

/// Browser request body for `POST /admin/command`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub command: String,
}

/// Generic success acknowledgment.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Generic error body with a human-readable reason.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            error: reason.into(),
        }
    }
}

/// Response to a successfully executed admin command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub response: String,
}

/// Response to `GET /chat/auth-status`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub linked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
}

impl AuthStatusResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            linked: false,
            account_id: None,
            game_uuid: None,
            player_name: None,
        }
    }
}
