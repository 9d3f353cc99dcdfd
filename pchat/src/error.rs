//! Chat-layer errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    /// The incoming message was empty after trimming. Caller misuse,
    /// rejected before any session mutation.
    EmptyMessage,
    /// A required argument (the session id on reset) was missing or blank.
    InvalidArgument,
    /// The session store itself failed.
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn empty_message(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::EmptyMessage, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidArgument, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}
