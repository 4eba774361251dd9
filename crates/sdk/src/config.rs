//! Configuration types for the Todoist SDK.

use std::time::Duration;
use todoist_core::RateLimits;
use url::Url;

/// Hosted Todoist REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/api/v1";

/// Default request timeout (15 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Configuration for the Todoist client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, always ending in `/`.
    pub base_url: Url,
    /// API token sent as a bearer credential.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Local request budget.
    pub rate_limits: RateLimits,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            rate_limits: RateLimits::default(),
        }
    }
}

/// Make sure `url` ends with a slash so that joining a relative path keeps
/// the version prefix (`/api/v1` + `tasks` = `/api/v1/tasks`).
pub fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
