//! Session storage contracts and the bounded in-memory implementation.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard};

use pcommon::SessionId;
use uuid::Uuid;

use crate::{ChatError, Turn};

pub type ChatFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful, concise AI assistant. Answer user queries politely and clearly.";

pub const DEFAULT_MAX_TURNS: usize = 20;

pub trait SessionStore: Send + Sync {
    /// Registers a fresh session seeded with the system turn and returns its
    /// generated identifier.
    fn create<'a>(&'a self) -> ChatFuture<'a, Result<SessionId, ChatError>>;

    /// Appends one turn, initializing unknown ids with the system turn
    /// first. The bounded-history invariant is applied in the same critical
    /// section as the append.
    fn append<'a>(
        &'a self,
        session_id: &'a str,
        turn: Turn,
    ) -> ChatFuture<'a, Result<(), ChatError>>;

    /// Returns a snapshot of the session's turns. Unknown ids yield the
    /// single-element system-only default without registering anything.
    fn read<'a>(&'a self, session_id: &'a str) -> ChatFuture<'a, Result<Vec<Turn>, ChatError>>;

    /// Unconditionally reinitializes the session to the single system turn,
    /// creating the entry if it did not exist.
    fn reset<'a>(&'a self, session_id: &'a str) -> ChatFuture<'a, Result<(), ChatError>>;
}

/// Volatile session registry. One coarse lock guards the whole map; each
/// mutation (including truncation) is a single critical section, so appends
/// on the same session never interleave.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Vec<Turn>>>,
    system_prompt: String,
    max_turns: usize,
}

impl InMemorySessionStore {
    pub fn new(system_prompt: impl Into<String>, max_turns: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            system_prompt: system_prompt.into(),
            max_turns: max_turns.max(2),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT, DEFAULT_MAX_TURNS)
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    fn seed(&self) -> Vec<Turn> {
        vec![Turn::system(self.system_prompt.clone())]
    }

    fn sessions_ref(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Turn>>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|_| ChatError::store("session store lock poisoned"))
    }

    fn sessions_mut(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Turn>>>, ChatError> {
        self.sessions_ref()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create<'a>(&'a self) -> ChatFuture<'a, Result<SessionId, ChatError>> {
        Box::pin(async move {
            let id = Uuid::new_v4().to_string();
            self.sessions_mut()?.insert(id.clone(), self.seed());
            Ok(SessionId::from(id))
        })
    }

    fn append<'a>(
        &'a self,
        session_id: &'a str,
        turn: Turn,
    ) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            let mut sessions = self.sessions_mut()?;
            let turns = sessions
                .entry(session_id.to_string())
                .or_insert_with(|| self.seed());

            turns.push(turn);

            // invariant: turns[0] stays the system turn, the oldest of the
            // rest are evicted once the cap is exceeded
            if turns.len() > self.max_turns {
                let overflow = turns.len() - self.max_turns;
                turns.drain(1..1 + overflow);
            }

            Ok(())
        })
    }

    fn read<'a>(&'a self, session_id: &'a str) -> ChatFuture<'a, Result<Vec<Turn>, ChatError>> {
        Box::pin(async move {
            let sessions = self.sessions_ref()?;
            Ok(sessions
                .get(session_id)
                .cloned()
                .unwrap_or_else(|| self.seed()))
        })
    }

    fn reset<'a>(&'a self, session_id: &'a str) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            self.sessions_mut()?
                .insert(session_id.to_string(), self.seed());
            Ok(())
        })
    }
}
