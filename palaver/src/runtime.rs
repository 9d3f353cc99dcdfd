//! Runtime wiring helpers for chat proxy usage.

use std::sync::Arc;

use crate::{
    ChatService, GeminiGenerator, InMemorySessionStore, SecretString, SessionStore, TextGenerator,
};

pub fn in_memory_store(system_prompt: impl Into<String>, max_turns: usize) -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new(system_prompt, max_turns))
}

pub fn chat_service(generator: Arc<dyn TextGenerator>) -> ChatService {
    ChatService::builder(generator).build()
}

pub fn chat_service_with_store(
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn SessionStore>,
) -> ChatService {
    ChatService::builder(generator).store(store).build()
}

/// Builds a Gemini generator over its default HTTP transport.
pub fn gemini_generator(api_key: SecretString, model: impl Into<String>) -> GeminiGenerator {
    let transport = GeminiGenerator::default_http_transport(reqwest::Client::new(), api_key);
    GeminiGenerator::new(Arc::new(transport)).with_model(model)
}
