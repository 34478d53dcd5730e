use async_trait::async_trait;
use llm::{Client, ClientConfig, GenerateOptions, TransportError};
use tracing::info;

use crate::traits::TextGenerator;

/// Adapter from the HTTP client to the provider trait. Works for any backend
/// the client speaks (local Ollama or a hosted OpenAI-compatible API).
pub struct LlmProvider {
    client: Client,
}

impl LlmProvider {
    pub fn new(client: Client) -> Self {
        info!(provider = client.backend().display_name(), model = client.model(), "text generation provider ready");
        Self { client }
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Client::new(config)?))
    }
}

#[async_trait]
impl TextGenerator for LlmProvider {
    async fn generate(&self, prompt: &str, opts: GenerateOptions) -> Result<String, TransportError> {
        self.client.generate(prompt, opts).await
    }

    fn name(&self) -> &str {
        self.client.backend().display_name()
    }
}
