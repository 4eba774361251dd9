// Task tools

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    created_result, json_result, json_schema_array, json_schema_number, json_schema_object,
    json_schema_string, parse_args, Tool,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use todoist_core::types::ResourceId;
use todoist_sdk::api::{CreateTaskRequest, QuickAddRequest, TaskFilters, UpdateTaskRequest};
use todoist_sdk::TodoistClient;

#[derive(Debug, Deserialize)]
struct TaskIdArgs {
    task_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct UpdateTaskArgs {
    task_id: ResourceId,
    #[serde(flatten)]
    request: UpdateTaskRequest,
}

fn task_id_schema() -> Value {
    json_schema_object(
        json!({ "task_id": json_schema_number("Task ID") }),
        vec!["task_id"],
    )
}

/// Properties shared by create_task and update_task
fn task_field_properties() -> Map<String, Value> {
    [
        ("description", json_schema_string("Task description (optional)")),
        ("project_id", json_schema_number("Project ID (optional)")),
        ("section_id", json_schema_number("Section ID (optional)")),
        ("parent_id", json_schema_number("Parent task ID (optional)")),
        (
            "label_ids",
            json_schema_array(json!({"type": "number"}), "Label IDs (optional)"),
        ),
        ("priority", json_schema_number("Priority 1-4 (optional)")),
        ("due_string", json_schema_string("Natural language due date (optional)")),
        ("due_date", json_schema_string("Due date YYYY-MM-DD (optional)")),
        ("due_datetime", json_schema_string("Due datetime RFC3339 (optional)")),
        ("due_lang", json_schema_string("Language for date parsing (optional)")),
        ("assignee", json_schema_number("Assignee user ID (optional)")),
    ]
    .into_iter()
    .map(|(name, schema)| (name.to_string(), schema))
    .collect()
}

/// Tool to list active tasks
pub struct ListTasksTool {
    client: TodoistClient,
}

impl ListTasksTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListTasksTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_tasks".to_string(),
            description: "List Todoist tasks with optional filters".to_string(),
            input_schema: json_schema_object(
                json!({
                    "project_id": json_schema_number("Filter by project ID (optional)"),
                    "section_id": json_schema_number("Filter by section ID (optional)"),
                    "label_id": json_schema_number("Filter by label ID (optional)"),
                    "filter": json_schema_string("Filter expression (optional)"),
                    "ids": json_schema_array(json!({"type": "number"}), "Specific task IDs (optional)")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let filters: TaskFilters = parse_args("list_tasks", arguments)?;
        let tasks = self.client.tasks().list(&filters).await?;
        json_result(&tasks)
    }
}

/// Tool to create a task
pub struct CreateTaskTool {
    client: TodoistClient,
}

impl CreateTaskTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateTaskTool {
    fn schema(&self) -> ToolSchema {
        let mut properties = Map::new();
        properties.insert(
            "content".to_string(),
            json_schema_string("Task content/title"),
        );
        properties.extend(task_field_properties());
        properties.insert(
            "project_id".to_string(),
            json_schema_number("Project ID (optional, defaults to Inbox)"),
        );
        properties.insert(
            "parent_id".to_string(),
            json_schema_number("Parent task ID for subtasks (optional)"),
        );

        ToolSchema {
            name: "create_task".to_string(),
            description: "Create a new Todoist task".to_string(),
            input_schema: json_schema_object(Value::Object(properties), vec!["content"]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let request: CreateTaskRequest = parse_args("create_task", arguments)?;
        let task = self.client.tasks().create(&request).await?;
        created_result("Task created successfully", &task)
    }
}

/// Tool to fetch a single task
pub struct GetTaskTool {
    client: TodoistClient,
}

impl GetTaskTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetTaskTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_task".to_string(),
            description: "Get a specific Todoist task by ID".to_string(),
            input_schema: task_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: TaskIdArgs = parse_args("get_task", arguments)?;
        let task = self.client.tasks().get(&args.task_id).await?;
        json_result(&task)
    }
}

/// Tool to update a task
pub struct UpdateTaskTool {
    client: TodoistClient,
}

impl UpdateTaskTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateTaskTool {
    fn schema(&self) -> ToolSchema {
        let mut properties = Map::new();
        properties.insert("task_id".to_string(), json_schema_number("Task ID"));
        properties.insert(
            "content".to_string(),
            json_schema_string("Task content/title (optional)"),
        );
        properties.extend(task_field_properties());

        ToolSchema {
            name: "update_task".to_string(),
            description: "Update a Todoist task".to_string(),
            input_schema: json_schema_object(Value::Object(properties), vec!["task_id"]),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: UpdateTaskArgs = parse_args("update_task", arguments)?;
        self.client
            .tasks()
            .update(&args.task_id, &args.request)
            .await?;
        Ok(CallToolResult::text("Task updated successfully"))
    }
}

/// Tool to complete a task
pub struct CloseTaskTool {
    client: TodoistClient,
}

impl CloseTaskTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CloseTaskTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "close_task".to_string(),
            description: "Mark a Todoist task as completed".to_string(),
            input_schema: task_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: TaskIdArgs = parse_args("close_task", arguments)?;
        self.client.tasks().close(&args.task_id).await?;
        Ok(CallToolResult::text("Task marked as completed successfully"))
    }
}

/// Tool to reopen a completed task
pub struct ReopenTaskTool {
    client: TodoistClient,
}

impl ReopenTaskTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ReopenTaskTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "reopen_task".to_string(),
            description: "Reopen a completed Todoist task".to_string(),
            input_schema: task_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: TaskIdArgs = parse_args("reopen_task", arguments)?;
        self.client.tasks().reopen(&args.task_id).await?;
        Ok(CallToolResult::text("Task reopened successfully"))
    }
}

/// Tool to delete a task
pub struct DeleteTaskTool {
    client: TodoistClient,
}

impl DeleteTaskTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteTaskTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_task".to_string(),
            description: "Delete a Todoist task".to_string(),
            input_schema: task_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: TaskIdArgs = parse_args("delete_task", arguments)?;
        self.client.tasks().delete(&args.task_id).await?;
        Ok(CallToolResult::text("Task deleted successfully"))
    }
}

/// Tool to create a task from natural language
pub struct QuickAddTaskTool {
    client: TodoistClient,
}

impl QuickAddTaskTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for QuickAddTaskTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "quick_add_task".to_string(),
            description: "Create a task using natural language (quick add)".to_string(),
            input_schema: json_schema_object(
                json!({
                    "text": json_schema_string("Natural language task description (e.g., \"Submit report by Friday 5pm #Work p2\")"),
                    "note": json_schema_string("Initial note/comment (optional)"),
                    "reminder": json_schema_string("Reminder specification (optional)"),
                    "project_id": json_schema_number("Override project ID (optional)"),
                    "section_id": json_schema_number("Override section ID (optional)"),
                    "parent_id": json_schema_number("Make this a subtask (optional)"),
                    "due_lang": json_schema_string("Language for date parsing (optional)"),
                    "priority": json_schema_number("Priority override 1-4 (optional)")
                }),
                vec!["text"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let request: QuickAddRequest = parse_args("quick_add_task", arguments)?;
        let task = self.client.tasks().quick_add(&request).await?;
        created_result("Task created via quick add", &task)
    }
}
