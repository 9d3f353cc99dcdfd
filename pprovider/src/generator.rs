use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::ProviderError;

pub type GeneratorFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One completed generation: the extracted reply text and the wall-clock
/// duration of the single provider call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub elapsed: Duration,
}

pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate<'a>(
        &'a self,
        prompt: String,
    ) -> GeneratorFuture<'a, Result<Generation, ProviderError>>;
}
