//! HTTP/WebSocket surface of the bridge.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
