//! Minecraft RCON (Source remote console protocol) client.
//!
//! The bridge opens a fresh session per command: connect, authenticate,
//! send one command, read one response, close. No pooling or reuse; see
//! the notes on `RconCommandChannel`.

mod client;
mod packet;

pub use client::RconCommandChannel;
pub use packet::{Packet, PacketType};
