// Tool trait, registry and schema helpers

use crate::error::{ToolError, ToolErrorKind};
use crate::protocol::{CallToolResult, ToolSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError>;
}

/// Tool registry for managing available tools.
///
/// Tools are listed in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. A tool registered under an existing name replaces
    /// the previous one in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        match self.index.get(&name) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&slot| self.tools[slot].clone())
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name. Every failure, including an unknown name, comes
    /// back as an error-flagged result.
    pub async fn call(&self, name: &str, arguments: Value) -> CallToolResult {
        debug!(tool = name, %arguments, "Handling tool");

        let outcome = match self.get(name) {
            Some(tool) => tool.execute(arguments).await,
            None => Err(ToolError::UnknownTool(name.to_string())),
        };

        match outcome {
            Ok(result) => result,
            Err(err) => {
                match err.kind() {
                    ToolErrorKind::UnknownTool | ToolErrorKind::InvalidArguments => {
                        warn!(tool = name, "Rejected tool call: {}", err)
                    }
                    ToolErrorKind::RateLimit => warn!(tool = name, "Rate limited: {}", err),
                    ToolErrorKind::Remote | ToolErrorKind::Serialization | ToolErrorKind::Other => {
                        error!(tool = name, "Error handling tool: {}", err)
                    }
                }
                CallToolResult::error(err.to_string())
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode the argument bag of `tool`. A missing bag counts as `{}`.
pub fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

/// Result holding the pretty-printed payload
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ToolError> {
    Ok(CallToolResult::text(serde_json::to_string_pretty(value)?))
}

/// Result of a create: `<phrase>:` followed by the new entity
pub fn created_result<T: Serialize>(phrase: &str, value: &T) -> Result<CallToolResult, ToolError> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(CallToolResult::text(format!("{}:\n{}", phrase, json)))
}

// Helper functions for creating tool schemas

/// Object schema. `required` is omitted when empty.
pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    let mut schema = serde_json::json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = serde_json::json!(required);
    }
    schema
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: Value, description: &str) -> Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

pub fn json_schema_any_object(description: &str) -> Value {
    serde_json::json!({
        "type": "object",
        "description": description
    })
}
