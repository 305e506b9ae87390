//! Game chat bridge library.
//!
//! Relays chat between a game server and browser clients: game-originated
//! events arrive over a webhook and are fanned out to every connected
//! WebSocket client; browser-originated messages are identity-resolved and
//! delivered into the game through its remote console (RCON) protocol.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
pub mod config;
