//! Chat client configuration
//!
//! Read from the environment, then overridden by command-line flags.

use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

pub const ENV_ENDPOINT: &str = "CLITRONIC_ENDPOINT";
pub const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_TIMEOUT: &str = "CLITRONIC_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the chat server; requests go to `<endpoint>/api/chat`
    pub endpoint: String,
    /// Forwarded in the `x-api-key` header
    pub api_key: Option<String>,
    /// Applies to establishing the connection only, never to the stream
    pub connect_timeout_secs: u64,
    /// Attempts to open the stream before giving up
    pub max_retries: u32,
    pub initial_retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|s| !s.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        config.api_key = lookup(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.connect_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT, raw),
            }
        }

        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.endpoint.trim_end_matches('/'))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
