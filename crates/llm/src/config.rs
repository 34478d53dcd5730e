use std::time::Duration;

use crate::Backend;

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("unknown AI provider: {0}")]
    UnknownProvider(String),
    #[error("http client: {0}")]
    HttpClient(String),
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub backend: Backend,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
    pub api_key: Option<String>,
}

impl ClientConfig {
    pub fn ollama(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: Backend::Ollama,
            endpoint: endpoint.into(),
            model: model.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
        }
    }

    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: Backend::OpenAiCompatible,
            endpoint: GROQ_BASE_URL.to_string(),
            model: model.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: Some(api_key.into()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup (env, map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("AI_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid { key: "AI_TIMEOUT_SECS", value: raw })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let provider = lookup("AI_PROVIDER").unwrap_or_else(|| "ollama".to_string());
        let config = match provider.trim().to_ascii_lowercase().as_str() {
            "ollama" => Self::ollama(
                lookup("OLLAMA_ENDPOINT").unwrap_or_else(|| DEFAULT_OLLAMA_ENDPOINT.to_string()),
                lookup("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            ),
            "groq" => {
                let key = lookup("GROQ_API_KEY")
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ConfigError::Missing("GROQ_API_KEY"))?;
                Self::groq(
                    key,
                    lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
                )
            }
            _ => return Err(ConfigError::UnknownProvider(provider)),
        };

        Ok(config.with_timeout(Duration::from_secs(timeout_secs)))
    }
}
