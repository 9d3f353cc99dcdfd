//! Unified facade over the palaver workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core palaver crates and provides convenience wiring
//! helpers for common setup flows.

pub mod prelude;
pub mod runtime;

pub use pchat;
pub use pcommon;
pub use pprovider;

pub use pchat::{
    ChatError, ChatErrorKind, ChatFuture, ChatReply, ChatService, ChatServiceBuilder,
    DEFAULT_MAX_TURNS, DEFAULT_SYSTEM_PROMPT, InMemorySessionStore, ResetAck, Role, SessionStore,
    Turn, assemble,
};
pub use pcommon::{BoxFuture, SessionId};
pub use pprovider::{
    ClassifiedFailure, FailureCategory, GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiGenerator,
    GeminiHttpTransport, GeminiTransport, Generation, GeneratorFuture, ProviderError,
    ProviderErrorKind, SecretString, TextGenerator, classify,
};

pub use runtime::{chat_service, chat_service_with_store, gemini_generator, in_memory_store};
