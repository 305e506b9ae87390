//! Domain layer: entities, value objects and the trait seams the use cases
//! depend on. Concrete implementations live in the infrastructure layer
//! (dependency inversion, same as the repository/pusher split upstream).

mod broadcast;
mod command;
mod identity;
mod message;

pub use broadcast::{BroadcastHandle, ChatBroadcaster, ConnectionId};
pub use command::{CommandChannel, CommandError};
pub use identity::{AccountId, GameIdentity, IdentityError, IdentityStore, Resolution, resolve};
pub use message::{ChatMessage, MessageKind, MessageSource, SERVER_AUTHOR};
