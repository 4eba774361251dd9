use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;
use todoist_sdk::{ClientConfig, DEFAULT_BASE_URL};
use url::Url;

pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Server configuration, read from the environment once at startup.
#[derive(Clone)]
pub struct McpConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Accepted for compatibility; requests are never retried.
    pub retry_attempts: u32,
    pub debug: bool,
}

impl McpConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let api_key = var("TODOIST_API_KEY")
            .context("TODOIST_API_KEY environment variable is required")?;
        let base_url = var("TODOIST_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_ms = parse_var("TODOIST_TIMEOUT", var("TODOIST_TIMEOUT"), DEFAULT_TIMEOUT_MS)?;
        let retry_attempts = parse_var(
            "TODOIST_RETRY_ATTEMPTS",
            var("TODOIST_RETRY_ATTEMPTS"),
            DEFAULT_RETRY_ATTEMPTS,
        )?;
        let debug = var("DEBUG").as_deref() == Some("true");

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            retry_attempts,
            debug,
        })
    }

    /// Command line values win over the environment.
    pub fn apply_overrides(&mut self, base_url: Option<String>, timeout_ms: Option<u64>, debug: bool) {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(timeout_ms) = timeout_ms {
            self.timeout = Duration::from_millis(timeout_ms);
        }
        self.debug |= debug;
    }

    /// Todoist tokens are 40 hex characters. Anything else still gets a
    /// chance against the API.
    pub fn api_key_looks_valid(&self) -> bool {
        validate_api_key(&self.api_key)
    }

    /// Lower to the SDK client configuration.
    pub fn to_client_config(&self) -> Result<ClientConfig> {
        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid TODOIST_API_BASE_URL: {}", self.base_url))?;

        let mut config = ClientConfig::new(base_url, self.api_key.clone());
        config.timeout = self.timeout;
        Ok(config)
    }
}

impl std::fmt::Debug for McpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry_attempts", &self.retry_attempts)
            .field("debug", &self.debug)
            .finish()
    }
}

pub fn validate_api_key(api_key: &str) -> bool {
    api_key.len() == 40 && api_key.chars().all(|c| c.is_ascii_hexdigit())
}

fn parse_var<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        None => Ok(default),
    }
}
