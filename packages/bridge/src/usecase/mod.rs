//! UseCase layer: one struct per bridge operation, depending only on the
//! domain trait seams.

mod admin_command;
mod error;
mod ingest_event;
mod send_chat;

pub use admin_command::AdminCommandUseCase;
pub use error::{GateError, IngestError, SendError};
pub use ingest_event::IngestEventUseCase;
pub use send_chat::SendChatUseCase;
