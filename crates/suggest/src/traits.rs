use async_trait::async_trait;
use llm::{GenerateOptions, TransportError};

/// Anything that can turn a prompt into generated text in one round-trip.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one generation call. Implementations must not retry.
    async fn generate(&self, prompt: &str, opts: GenerateOptions) -> Result<String, TransportError>;

    /// Get the provider name
    fn name(&self) -> &str;
}
