// MCP (Model Context Protocol) server exposing the Todoist API as tools
// to agent clients over stdio

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::McpConfig;
pub use error::{ToolError, ToolErrorKind};
pub use server::McpServer;
pub use tools::{todoist_registry, ToolRegistry};
