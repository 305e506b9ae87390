//! Infrastructure layer: concrete implementations of the domain trait seams
//! plus the wire-format DTOs.

pub mod dto;
pub mod identity;
pub mod rcon;
pub mod registry;

pub use identity::HttpIdentityStore;
pub use rcon::RconCommandChannel;
pub use registry::ConnectionRegistry;
