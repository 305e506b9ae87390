//! Remote console command channel.

use async_trait::async_trait;
use thiserror::Error;

/// Failure talking to the game server's remote console.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("failed to connect to game server: {0}")]
    ConnectFailed(String),
    #[error("game server rejected RCON credentials")]
    AuthFailed,
    #[error("game server did not respond within {0} seconds")]
    Timeout(u64),
    #[error("RCON protocol error: {0}")]
    Protocol(String),
}

/// One-shot command execution against the game server.
///
/// Every call is a complete session: connect, authenticate, send one
/// command, read one response, close. Implementations never reuse a
/// connection across calls, so two concurrent callers can never race on a
/// shared socket. None of the failure modes are retried here; retry policy
/// belongs to the caller.
#[async_trait]
pub trait CommandChannel: Send + Sync {
    async fn execute(&self, command: &str) -> Result<String, CommandError>;
}
