//! UseCase error types.
//!
//! Three families, kept distinct so handlers can map them to precise
//! statuses: validation errors (caller must fix the input), authorization
//! errors (never downgraded to a generic failure) and channel/store errors
//! (surfaced with the specific reason, never retried here).

use thiserror::Error;

use crate::domain::{CommandError, IdentityError};

/// Failure ingesting a game-originated webhook event.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Message is required")]
    MissingMessage,
}

/// Failure sending a browser-originated chat message into the game.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Message is required")]
    EmptyMessage,
    #[error("User not authenticated")]
    Unauthenticated,
    #[error("Game account not linked. Link your game account first.")]
    AccountNotLinked,
    #[error("Identity store unavailable: {0}")]
    IdentityUnavailable(#[from] IdentityError),
    #[error("Failed to send message to server: {0}")]
    DeliveryFailed(#[source] CommandError),
}

/// Failure running an administrator console command.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Not authorized")]
    Forbidden,
    #[error("Command is required")]
    EmptyCommand,
    #[error("Identity store unavailable: {0}")]
    IdentityUnavailable(#[from] IdentityError),
    #[error("Failed to execute command: {0}")]
    Channel(#[source] CommandError),
}
