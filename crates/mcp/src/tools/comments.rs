// Comment tools

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    created_result, json_result, json_schema_any_object, json_schema_number, json_schema_object,
    json_schema_string, parse_args, Tool,
};
use serde::Deserialize;
use serde_json::{json, Value};
use todoist_core::types::ResourceId;
use todoist_sdk::api::{CreateCommentRequest, UpdateCommentRequest};
use todoist_sdk::TodoistClient;

#[derive(Debug, Deserialize)]
struct ListCommentsArgs {
    #[serde(default)]
    task_id: Option<ResourceId>,
    #[serde(default)]
    project_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
struct CommentIdArgs {
    comment_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct UpdateCommentArgs {
    comment_id: ResourceId,
    #[serde(flatten)]
    request: UpdateCommentRequest,
}

fn comment_id_schema() -> Value {
    json_schema_object(
        json!({ "comment_id": json_schema_number("Comment ID") }),
        vec!["comment_id"],
    )
}

/// Tool to list comments of a task or project
pub struct ListCommentsTool {
    client: TodoistClient,
}

impl ListCommentsTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListCommentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_comments".to_string(),
            description: "List comments for a task or project".to_string(),
            input_schema: json_schema_object(
                json!({
                    "task_id": json_schema_number("Task ID (optional, either task_id or project_id required)"),
                    "project_id": json_schema_number("Project ID (optional, either task_id or project_id required)")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: ListCommentsArgs = parse_args("list_comments", arguments)?;
        let comments = self
            .client
            .comments()
            .list(args.task_id.as_ref(), args.project_id.as_ref())
            .await?;
        json_result(&comments)
    }
}

/// Tool to add a comment
pub struct CreateCommentTool {
    client: TodoistClient,
}

impl CreateCommentTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateCommentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_comment".to_string(),
            description: "Add a comment to a task or project".to_string(),
            input_schema: json_schema_object(
                json!({
                    "content": json_schema_string("Comment content"),
                    "task_id": json_schema_number("Task ID (optional, either task_id or project_id required)"),
                    "project_id": json_schema_number("Project ID (optional, either task_id or project_id required)"),
                    "attachment": json_schema_any_object("File attachment metadata (optional)")
                }),
                vec!["content"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let request: CreateCommentRequest = parse_args("create_comment", arguments)?;
        let comment = self.client.comments().create(&request).await?;
        created_result("Comment created successfully", &comment)
    }
}

/// Tool to fetch a single comment
pub struct GetCommentTool {
    client: TodoistClient,
}

impl GetCommentTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetCommentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_comment".to_string(),
            description: "Get a specific comment by ID".to_string(),
            input_schema: comment_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: CommentIdArgs = parse_args("get_comment", arguments)?;
        let comment = self.client.comments().get(&args.comment_id).await?;
        json_result(&comment)
    }
}

/// Tool to edit a comment
pub struct UpdateCommentTool {
    client: TodoistClient,
}

impl UpdateCommentTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateCommentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "update_comment".to_string(),
            description: "Update a comment".to_string(),
            input_schema: json_schema_object(
                json!({
                    "comment_id": json_schema_number("Comment ID"),
                    "content": json_schema_string("New comment content")
                }),
                vec!["comment_id", "content"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: UpdateCommentArgs = parse_args("update_comment", arguments)?;
        self.client
            .comments()
            .update(&args.comment_id, &args.request)
            .await?;
        Ok(CallToolResult::text("Comment updated successfully"))
    }
}

/// Tool to delete a comment
pub struct DeleteCommentTool {
    client: TodoistClient,
}

impl DeleteCommentTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteCommentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_comment".to_string(),
            description: "Delete a comment".to_string(),
            input_schema: comment_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: CommentIdArgs = parse_args("delete_comment", arguments)?;
        self.client.comments().delete(&args.comment_id).await?;
        Ok(CallToolResult::text("Comment deleted successfully"))
    }
}
