// Completed task and productivity tools

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_result, json_schema_number, json_schema_object, json_schema_string, parse_args, Tool};
use serde::Deserialize;
use serde_json::{json, Value};
use todoist_core::types::ResourceId;
use todoist_sdk::api::CompletionFilters;
use todoist_sdk::TodoistClient;

#[derive(Debug, Deserialize)]
struct CompletedByProjectArgs {
    project_id: ResourceId,
    #[serde(flatten)]
    filters: CompletionFilters,
}

/// Tool to list completed tasks
pub struct GetCompletedTasksTool {
    client: TodoistClient,
}

impl GetCompletedTasksTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetCompletedTasksTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_completed_tasks".to_string(),
            description: "Get completed tasks with optional filters".to_string(),
            input_schema: json_schema_object(
                json!({
                    "limit": json_schema_number("Maximum number of tasks (default 30, max 200)"),
                    "since": json_schema_string("Only tasks completed after this timestamp (RFC3339)")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let filters: CompletionFilters = parse_args("get_completed_tasks", arguments)?;
        let completed = self.client.completed().all(&filters).await?;
        json_result(&completed)
    }
}

/// Tool to list completed tasks of one project
pub struct GetCompletedTasksByProjectTool {
    client: TodoistClient,
}

impl GetCompletedTasksByProjectTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetCompletedTasksByProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_completed_tasks_by_project".to_string(),
            description: "Get completed tasks for a specific project".to_string(),
            input_schema: json_schema_object(
                json!({
                    "project_id": json_schema_number("Project ID"),
                    "limit": json_schema_number("Maximum number of tasks (default 30, max 200)"),
                    "until": json_schema_string("Only tasks completed before this date (YYYY-MM-DD)")
                }),
                vec!["project_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: CompletedByProjectArgs = parse_args("get_completed_tasks_by_project", arguments)?;
        let completed = self
            .client
            .completed()
            .by_project(&args.project_id, &args.filters)
            .await?;
        json_result(&completed)
    }
}

/// Tool to fetch karma and completion statistics
pub struct GetProductivityStatsTool {
    client: TodoistClient,
}

impl GetProductivityStatsTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetProductivityStatsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_productivity_stats".to_string(),
            description: "Get productivity statistics including karma and daily completion counts"
                .to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult, ToolError> {
        let stats = self.client.completed().stats().await?;
        json_result(&stats)
    }
}
