//! Errors raised while executing a tool.

use todoist_sdk::{ErrorKind, TodoistError};

/// Discriminant of a [`ToolError`], used for logging at the dispatch
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    UnknownTool,
    InvalidArguments,
    Serialization,
    RateLimit,
    Remote,
    Other,
}

/// Failure of a single tool invocation. Never crosses the protocol
/// boundary: the registry turns it into an error-flagged result.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] TodoistError),
}

impl ToolError {
    pub fn kind(&self) -> ToolErrorKind {
        match self {
            Self::UnknownTool(_) => ToolErrorKind::UnknownTool,
            Self::InvalidArguments { .. } => ToolErrorKind::InvalidArguments,
            Self::Serialization(_) => ToolErrorKind::Serialization,
            Self::Api(err) => match err.kind() {
                ErrorKind::RateLimit => ToolErrorKind::RateLimit,
                ErrorKind::Remote => ToolErrorKind::Remote,
                ErrorKind::Other => ToolErrorKind::Other,
            },
        }
    }
}
