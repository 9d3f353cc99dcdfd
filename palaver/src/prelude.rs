//! Common palaver imports for downstream applications.

pub use crate::runtime::{chat_service, chat_service_with_store, gemini_generator, in_memory_store};
pub use pchat::{
    ChatError, ChatErrorKind, ChatReply, ChatService, ChatServiceBuilder, InMemorySessionStore,
    ResetAck, Role, SessionStore, Turn, assemble,
};
pub use pcommon::SessionId;
pub use pprovider::{
    ClassifiedFailure, FailureCategory, GeminiGenerator, Generation, ProviderError,
    ProviderErrorKind, SecretString, TextGenerator, classify,
};
