//! Turn orchestration over the session store and text generator.

use std::sync::Arc;

use pcommon::SessionId;
use pprovider::{TextGenerator, classify};

use crate::{
    ChatError, ChatReply, InMemorySessionStore, ResetAck, SessionStore, Turn, prompt,
};

#[derive(Clone)]
pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn SessionStore>,
}

impl ChatService {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn SessionStore>) -> Self {
        Self { generator, store }
    }

    pub fn builder(generator: Arc<dyn TextGenerator>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(generator)
    }

    /// Handles one user message: validate, resolve the session, record the
    /// user turn, assemble the prompt from the post-append snapshot, and
    /// invoke the generator once.
    ///
    /// Provider failures are classified and folded into a normal reply
    /// carrying the friendly message plus the raw error; only caller misuse
    /// (an empty message) surfaces as `Err`.
    pub async fn handle_message(
        &self,
        session_id: Option<SessionId>,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(ChatError::empty_message("message must not be empty"));
        }

        // a blank id counts as absent, matching "create on first use"
        let session_id = match session_id {
            Some(id) if !id.is_blank() => id,
            _ => self.store.create().await?,
        };

        self.store
            .append(session_id.as_str(), Turn::user(trimmed))
            .await?;

        // The user turn is already stored, so the snapshot and the pending
        // parameter both carry the message; assembly is re-derived from the
        // snapshot and can never diverge from what was recorded.
        let turns = self.store.read(session_id.as_str()).await?;
        let assembled = prompt::assemble(&turns, trimmed);

        match self.generator.generate(assembled).await {
            Ok(generation) => {
                self.store
                    .append(session_id.as_str(), Turn::assistant(generation.text.clone()))
                    .await?;

                tracing::info!(
                    event = "turn_complete",
                    provider = self.generator.name(),
                    session_id = %session_id,
                    elapsed_ms = generation.elapsed.as_millis() as u64
                );

                Ok(ChatReply {
                    session_id,
                    message: generation.text,
                    error: None,
                })
            }
            Err(error) => {
                let failure = classify(&error);

                tracing::error!(
                    event = "turn_failed",
                    provider = self.generator.name(),
                    session_id = %session_id,
                    category = %failure.category,
                    error = %failure.raw
                );

                // a failed turn leaves no trace in the session history
                Ok(ChatReply {
                    session_id,
                    message: failure.friendly_message,
                    error: Some(failure.raw),
                })
            }
        }
    }

    /// Reinitializes a session to the single system turn. The id need not
    /// exist yet; a blank id is caller misuse.
    pub async fn reset_session(&self, session_id: &str) -> Result<ResetAck, ChatError> {
        if session_id.trim().is_empty() {
            return Err(ChatError::invalid_argument("session_id is required"));
        }

        self.store.reset(session_id).await?;

        Ok(ResetAck {
            session_id: SessionId::from(session_id),
        })
    }
}

pub struct ChatServiceBuilder {
    generator: Arc<dyn TextGenerator>,
    store: Option<Arc<dyn SessionStore>>,
}

impl ChatServiceBuilder {
    fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            store: None,
        }
    }

    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> ChatService {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::with_defaults()));

        ChatService::new(self.generator, store)
    }
}
