use std::time::Duration;

use reqwest::Client as Http;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

mod config;

pub use config::{
    ClientConfig, ConfigError, DEFAULT_GROQ_MODEL, DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL,
    DEFAULT_TIMEOUT_SECS, GROQ_BASE_URL,
};

/// Which wire protocol the client speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Local Ollama server (`/api/generate`).
    Ollama,
    /// Hosted OpenAI-compatible chat completions (Groq and friends).
    OpenAiCompatible,
}

impl Backend {
    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::Ollama => "Ollama",
            Backend::OpenAiCompatible => "OpenAI-compatible",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerateOptions {
    pub temperature: f32,
    /// Output token budget (`num_predict` for Ollama, `max_tokens` otherwise).
    pub max_tokens: u32,
}

/// Every way a single generation round-trip can fail.
#[derive(Clone, Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("could not reach backend: {0}")]
    Connect(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response envelope: {0}")]
    Envelope(String),
    #[error("request failed: {0}")]
    Request(String),
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaEnvelope {
    response: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Clone, Debug)]
pub struct Client {
    http: Http,
    backend: Backend,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let http = Http::builder()
            .pool_max_idle_per_host(8)
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("build http client: {e}")))?;
        Ok(Self {
            http,
            backend: config.backend,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model,
            api_key: config.api_key.filter(|k| !k.is_empty()),
            timeout: config.timeout,
        })
    }

    /// Convenience: build from `AI_PROVIDER`, `OLLAMA_*`, `GROQ_*` and `AI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = ClientConfig::from_env()?;
        Self::new(config).map_err(|e| ConfigError::HttpClient(e.to_string()))
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One round-trip to the backend. No retries.
    pub async fn generate(&self, prompt: &str, opts: GenerateOptions) -> Result<String, TransportError> {
        match self.backend {
            Backend::Ollama => self.generate_ollama(prompt, opts).await,
            Backend::OpenAiCompatible => self.generate_chat(prompt, opts).await,
        }
    }

    async fn generate_ollama(&self, prompt: &str, opts: GenerateOptions) -> Result<String, TransportError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: opts.temperature,
                num_predict: opts.max_tokens,
            },
        };

        let raw = self.post(&url, &body).await?;
        let envelope: OllamaEnvelope =
            serde_json::from_str(&raw).map_err(|e| TransportError::Envelope(e.to_string()))?;
        Ok(envelope.response)
    }

    async fn generate_chat(&self, prompt: &str, opts: GenerateOptions) -> Result<String, TransportError> {
        // OpenAI-compatible Chat Completions
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage { role: "user", content: prompt }],
            temperature: opts.temperature,
            max_tokens: opts.max_tokens,
        };

        let raw = self.post(&url, &body).await?;
        let v: Value = serde_json::from_str(&raw).map_err(|e| TransportError::Envelope(e.to_string()))?;
        let content = v
            .pointer("/choices/0/message/content")
            .and_then(|x| x.as_str())
            .ok_or_else(|| TransportError::Envelope("missing choices[0].message.content".to_string()))?;
        Ok(content.to_string())
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<String, TransportError> {
        debug!(url, model = %self.model, backend = self.backend.display_name(), "sending generation request");

        let mut req = self.http.post(url).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(|e| self.classify(e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        resp.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
