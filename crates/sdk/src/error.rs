//! Error types for the Todoist SDK.

use chrono::{DateTime, Utc};
use serde_json::Value;
use todoist_core::BudgetExhausted;

/// Result type for SDK operations.
pub type TodoistResult<T> = Result<T, TodoistError>;

/// Coarse classification of a [`TodoistError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local budget exhausted or the API answered 429.
    RateLimit,
    /// The remote exchange failed.
    Remote,
    /// Anything else.
    Other,
}

/// Error types that can occur when talking to the Todoist API.
#[derive(Debug, thiserror::Error)]
pub enum TodoistError {
    /// Too many requests, either refused locally or by the API.
    #[error("{message}")]
    RateLimited {
        message: String,
        reset_at: DateTime<Utc>,
    },

    /// A request failed with an HTTP error status or a transport error.
    #[error("{message}")]
    Api {
        /// HTTP status, absent when no response was received.
        status: Option<u16>,
        message: String,
        /// Response body as JSON, or the raw text as a JSON string.
        body: Option<Value>,
    },

    /// A failure that did not come from the HTTP exchange itself.
    #[error("Unknown API error")]
    Unknown { detail: String },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TodoistError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited { .. } => ErrorKind::RateLimit,
            Self::Api { .. } => ErrorKind::Remote,
            Self::Unknown { .. } | Self::Config(_) => ErrorKind::Other,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Rate limit raised by the API itself. The API does not say when its
    /// window resets, so a full window from now is assumed.
    pub fn remote_rate_limit() -> Self {
        Self::RateLimited {
            message: "Rate limit exceeded".to_string(),
            reset_at: Utc::now()
                + chrono::Duration::minutes(todoist_core::rate_limit::DEFAULT_WINDOW_MINUTES),
        }
    }

    /// Wrap an arbitrary failure, keeping its description for diagnostics.
    pub fn unknown(err: impl std::fmt::Display) -> Self {
        Self::Unknown {
            detail: err.to_string(),
        }
    }

    /// Build an error from a failed HTTP response.
    ///
    /// The message is the `error` field of a JSON body when there is one,
    /// otherwise `fallback` (the transport's own description).
    pub fn from_response(status: u16, body: &str, fallback: impl Into<String>) -> Self {
        if status == 429 {
            return Self::remote_rate_limit();
        }

        let body = parse_body(body);
        let message = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback.into());

        Self::Api {
            status: Some(status),
            message,
            body,
        }
    }

    /// Build an error from a transport failure that produced no usable
    /// response (timeout, connection refused, undecodable body).
    pub fn from_transport(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        if status == Some(429) {
            return Self::remote_rate_limit();
        }

        Self::Api {
            status,
            message: err.to_string(),
            body: None,
        }
    }
}

impl From<BudgetExhausted> for TodoistError {
    fn from(err: BudgetExhausted) -> Self {
        Self::RateLimited {
            message: err.to_string(),
            reset_at: err.reset_at,
        }
    }
}

fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}
