//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        http::{admin_command, auth_status, chat_webhook, health_check, send_message},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat bridge server.
///
/// Wraps the wired-up application state and exposes the HTTP/WebSocket
/// surface.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router. Exposed separately from [`Server::run`] so tests
    /// can serve it on an ephemeral port.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/chat/webhook", post(chat_webhook))
            .route("/chat/send", post(send_message))
            .route("/chat/auth-status", get(auth_status))
            .route("/chat/ws", get(websocket_handler))
            .route("/admin/command", post(admin_command))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the bridge server until Ctrl+C or SIGTERM.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 4477)
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat bridge listening on {}", listener.local_addr()?);
        tracing::info!("Live feed at: ws://{}/chat/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
