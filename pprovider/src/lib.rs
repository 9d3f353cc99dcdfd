//! Text-generation gateway for the palaver conversational proxy.
//!
//! Owns the single-shot call to the external generator, the provider error
//! taxonomy, and the classification of raw failures into user-facing
//! categories.

mod classify;
mod error;
mod gemini;
mod generator;
mod secret;

pub mod prelude {
    pub use crate::classify::classify;
    pub use crate::{
        ClassifiedFailure, FailureCategory, GeminiGenerator, GeminiHttpTransport, GeminiTransport,
        Generation, GeneratorFuture, ProviderError, ProviderErrorKind, SecretString, TextGenerator,
    };
}

pub use classify::{ClassifiedFailure, FailureCategory, classify};
pub use error::{ProviderError, ProviderErrorKind};
pub use gemini::{
    GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiGenerator, GeminiHttpTransport, GeminiTransport,
    GenerateContentRequest,
};
pub use generator::{Generation, GeneratorFuture, TextGenerator};
pub use secret::SecretString;
