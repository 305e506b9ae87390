//! Shared application state.

use std::sync::Arc;

use crate::domain::{ChatBroadcaster, IdentityStore};
use crate::usecase::{AdminCommandUseCase, IngestEventUseCase, SendChatUseCase};

/// Shared application state handed to every handler.
pub struct AppState {
    pub ingest_event_usecase: Arc<IngestEventUseCase>,
    pub send_chat_usecase: Arc<SendChatUseCase>,
    pub admin_command_usecase: Arc<AdminCommandUseCase>,
    /// Registered/unregistered directly by the WebSocket handler.
    pub broadcaster: Arc<dyn ChatBroadcaster>,
    /// Queried directly by the auth-status handler.
    pub identity_store: Arc<dyn IdentityStore>,
    /// Shared secret required on webhook pushes; `None` accepts all events.
    pub webhook_secret: Option<String>,
    /// Name of the session cookie carrying the external account id.
    pub session_cookie: String,
}
