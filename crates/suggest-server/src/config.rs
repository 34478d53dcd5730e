use llm::{ClientConfig, ConfigError};

pub const DEFAULT_PORT: u16 = 5080;
pub const DEFAULT_MIN_DESCRIPTION_LENGTH: usize = 10;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub client: ClientConfig,
    pub port: u16,
    pub min_description_length: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let min_description_length =
            parse_or(&lookup, "AI_MIN_DESCRIPTION_LENGTH", DEFAULT_MIN_DESCRIPTION_LENGTH)?;
        let client = ClientConfig::from_lookup(lookup)?;

        Ok(Self { client, port, min_description_length })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw.clone() }),
        None => Ok(default),
    }
}
