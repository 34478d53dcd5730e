use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use llm::{GenerateOptions, TransportError};

use crate::traits::TextGenerator;

type Reply = Result<String, TransportError>;

/// A prompt/options pair the mock was asked to generate for.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub prompt: String,
    pub options: GenerateOptions,
}

/// Mock provider for testing. Plays queued replies in order, then repeats
/// the default reply forever.
pub struct MockProvider {
    default_reply: Reply,
    queued: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<MockCall>>,
    delay: Option<Duration>,
}

impl MockProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_default(Ok(text.into()))
    }

    pub fn failing(err: TransportError) -> Self {
        Self::with_default(Err(err))
    }

    /// Backend that is not there at all.
    pub fn unreachable() -> Self {
        Self::failing(TransportError::Connect("connection refused".to_string()))
    }

    fn with_default(default_reply: Reply) -> Self {
        Self {
            default_reply,
            queued: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Queue a one-off reply ahead of the default.
    pub fn then(self, reply: Reply) -> Self {
        self.queued.lock().unwrap_or_else(PoisonError::into_inner).push_back(reply);
        self
    }

    /// Sleep before answering, to simulate a slow model.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    async fn generate(&self, prompt: &str, opts: GenerateOptions) -> Result<String, TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockCall { prompt: prompt.to_string(), options: opts });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self.queued.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        queued.unwrap_or_else(|| self.default_reply.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
