//! Data Transfer Objects for the HTTP API and the WebSocket live feed.
//!
//! DTOs carry data across the process boundary; conversion to and from
//! domain entities lives in `conversion.rs`.

pub mod conversion;
pub mod http;
pub mod websocket;
