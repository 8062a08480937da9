// src/config.rs
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CHAT_ENDPOINT: &str = "http://localhost:8000/chat";
pub const DEFAULT_SESSION_STORE: &str = "session_store.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub bind_addr: String,
}

impl ServerConfig {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        Ok(Self {
            api_key,
            base_url: lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub chat_endpoint: String,
    pub session_store: PathBuf,
}

impl WidgetConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            chat_endpoint: lookup("CHAT_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_CHAT_ENDPOINT.to_string()),
            session_store: lookup("SESSION_STORE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_STORE)),
        }
    }
}
