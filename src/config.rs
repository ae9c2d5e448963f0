use std::env;

use crate::{
    error::ConfigError,
    openai::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS},
};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub openai: OpenAiConfig,
}

impl AppConfig {
    /// Reads the process environment, after merging `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_key = lookup("OPENAI_API_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let openai = OpenAiConfig {
            api_key,
            base_url: lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            organization: lookup("OPENAI_ORG_ID"),
            project: lookup("OPENAI_PROJECT_ID"),
            timeout_ms: lookup("OPENAI_TIMEOUT_MS")
                .and_then(|value| value.parse::<u64>().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        };

        Ok(Self { port, openai })
    }
}
