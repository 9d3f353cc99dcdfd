//! Conversation-context management and turn orchestration.

mod error;
mod prompt;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatFuture, ChatReply, ChatService, ChatServiceBuilder,
        InMemorySessionStore, ResetAck, Role, SessionStore, Turn, assemble,
    };
    pub use pcommon::SessionId;
}

pub use error::{ChatError, ChatErrorKind};
pub use pcommon::SessionId;
pub use prompt::assemble;
pub use service::{ChatService, ChatServiceBuilder};
pub use store::{
    ChatFuture, DEFAULT_MAX_TURNS, DEFAULT_SYSTEM_PROMPT, InMemorySessionStore, SessionStore,
};
pub use types::{ChatReply, ResetAck, Role, Turn};
