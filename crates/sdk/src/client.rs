//! Main client for the Todoist SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{TodoistError, TodoistResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use todoist_core::{RateLimits, RateWindow};
use url::Url;

/// Main client for interacting with the Todoist API.
///
/// Cloning is cheap and clones share the rate window.
#[derive(Debug, Clone)]
pub struct TodoistClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl TodoistClient {
    /// Create a new client builder.
    pub fn builder() -> TodoistClientBuilder {
        TodoistClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> TodoistResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// The configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the local request budget.
    pub fn rate_window(&self) -> RateWindow {
        self.http.rate_window()
    }

    /// Get the health API.
    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    /// Get the projects API.
    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    /// Get the tasks API.
    pub fn tasks(&self) -> TasksApi<'_> {
        TasksApi::new(self)
    }

    /// Get the sections API.
    pub fn sections(&self) -> SectionsApi<'_> {
        SectionsApi::new(self)
    }

    /// Get the comments API.
    pub fn comments(&self) -> CommentsApi<'_> {
        CommentsApi::new(self)
    }

    /// Get the labels API.
    pub fn labels(&self) -> LabelsApi<'_> {
        LabelsApi::new(self)
    }

    /// Get the completed tasks and stats API.
    pub fn completed(&self) -> CompletedApi<'_> {
        CompletedApi::new(self)
    }
}

/// Builder for creating a TodoistClient.
pub struct TodoistClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    rate_limits: RateLimits,
}

impl TodoistClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            rate_limits: RateLimits::default(),
        }
    }

    /// Set the base URL of the API. Defaults to the hosted v1 API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the local request budget.
    pub fn rate_limits(mut self, limits: RateLimits) -> Self {
        self.rate_limits = limits;
        self
    }

    /// Build the client.
    pub fn build(self) -> TodoistResult<TodoistClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| TodoistError::Config("api_key is required".to_string()))?;

        let base_url_str = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(base_url_str).map_err(|e| {
            TodoistError::Config(format!("Invalid base URL '{}': {}", base_url_str, e))
        })?;

        let mut config = ClientConfig::new(base_url, api_key);
        config.timeout = self.timeout;
        config.rate_limits = self.rate_limits;

        TodoistClient::new(config)
    }
}

impl Default for TodoistClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
