//! Chat relay and remote-command bridge.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin bridge
//! cargo run --bin bridge -- --port 4477 --rcon-host game.internal
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use game_chat_bridge::{
    common::{logger::setup_logger, time::SystemClock},
    config::Config,
    infrastructure::{ConnectionRegistry, HttpIdentityStore, RconCommandChannel},
    ui::{Server, state::AppState},
    usecase::{AdminCommandUseCase, IngestEventUseCase, SendChatUseCase},
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = Config::parse();

    if config.webhook_secret.is_none() {
        tracing::warn!("No webhook secret configured; the webhook accepts all events");
    }

    // Initialize dependencies in order:
    // 1. Shared collaborators (clock, registry, RCON channel, identity store)
    // 2. UseCases
    // 3. Server

    let clock = Arc::new(SystemClock);
    let registry = Arc::new(ConnectionRegistry::new(clock.clone()));
    let command_channel = Arc::new(RconCommandChannel::new(
        config.rcon_host.clone(),
        config.rcon_port,
        config.rcon_password.clone(),
        Duration::from_secs(config.rcon_timeout_secs),
    ));
    let identity_store = Arc::new(HttpIdentityStore::new(config.identity_url.clone()));

    let ingest_event_usecase = Arc::new(IngestEventUseCase::new(registry.clone(), clock.clone()));
    let send_chat_usecase = Arc::new(SendChatUseCase::new(
        identity_store.clone(),
        command_channel.clone(),
        registry.clone(),
        clock.clone(),
    ));
    let admin_command_usecase = Arc::new(AdminCommandUseCase::new(
        identity_store.clone(),
        command_channel.clone(),
    ));

    let server = Server::new(AppState {
        ingest_event_usecase,
        send_chat_usecase,
        admin_command_usecase,
        broadcaster: registry,
        identity_store,
        webhook_secret: config.webhook_secret.clone(),
        session_cookie: config.session_cookie.clone(),
    });

    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
