use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::BotError;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Env var holding the settings file path
pub const CONFIG_PATH_VAR: &str = "HOMEWORK_BOT_CONFIG";

/// Secrets resolved once at startup
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve all three secrets through `lookup`. Unset and blank values
    /// are both reported as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let practicum_token = fetch(PRACTICUM_TOKEN);
        let telegram_token = fetch(TELEGRAM_TOKEN);
        let telegram_chat_id = fetch(TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(BotError::MissingCredentials { names: missing });
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    /// Pause between two polls, in seconds
    #[serde(default = "default_retry_period_secs")]
    pub retry_period_secs: u64,
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_retry_period_secs() -> u64 {
    600
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_period_secs: default_retry_period_secs(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl PollingConfig {
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        if settings.api.endpoint.trim().is_empty() {
            anyhow::bail!("api.endpoint must not be empty");
        }
        Ok(settings)
    }
}
