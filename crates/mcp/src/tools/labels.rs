// Label tools

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    created_result, json_result, json_schema_boolean, json_schema_number, json_schema_object,
    json_schema_string, parse_args, Tool,
};
use serde::Deserialize;
use serde_json::{json, Value};
use todoist_core::types::ResourceId;
use todoist_sdk::api::{CreateLabelRequest, UpdateLabelRequest};
use todoist_sdk::TodoistClient;

#[derive(Debug, Deserialize)]
struct LabelIdArgs {
    label_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct UpdateLabelArgs {
    label_id: ResourceId,
    #[serde(flatten)]
    request: UpdateLabelRequest,
}

fn label_id_schema() -> Value {
    json_schema_object(
        json!({ "label_id": json_schema_number("Label ID") }),
        vec!["label_id"],
    )
}

/// Tool to list all labels
pub struct ListLabelsTool {
    client: TodoistClient,
}

impl ListLabelsTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListLabelsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_labels".to_string(),
            description: "List all labels".to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult, ToolError> {
        let labels = self.client.labels().list().await?;
        json_result(&labels)
    }
}

/// Tool to create a label
pub struct CreateLabelTool {
    client: TodoistClient,
}

impl CreateLabelTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateLabelTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_label".to_string(),
            description: "Create a new label".to_string(),
            input_schema: json_schema_object(
                json!({
                    "name": json_schema_string("Label name"),
                    "color": json_schema_number("Color ID (optional)"),
                    "order": json_schema_number("Sort order (optional)"),
                    "favorite": json_schema_boolean("Mark as favorite (optional)")
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let request: CreateLabelRequest = parse_args("create_label", arguments)?;
        let label = self.client.labels().create(&request).await?;
        created_result("Label created successfully", &label)
    }
}

/// Tool to fetch a single label
pub struct GetLabelTool {
    client: TodoistClient,
}

impl GetLabelTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetLabelTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_label".to_string(),
            description: "Get a specific label by ID".to_string(),
            input_schema: label_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: LabelIdArgs = parse_args("get_label", arguments)?;
        let label = self.client.labels().get(&args.label_id).await?;
        json_result(&label)
    }
}

/// Tool to update a label
pub struct UpdateLabelTool {
    client: TodoistClient,
}

impl UpdateLabelTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateLabelTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "update_label".to_string(),
            description: "Update a label".to_string(),
            input_schema: json_schema_object(
                json!({
                    "label_id": json_schema_number("Label ID"),
                    "name": json_schema_string("New label name (optional)"),
                    "color": json_schema_number("Color ID (optional)"),
                    "order": json_schema_number("Sort order (optional)"),
                    "favorite": json_schema_boolean("Favorite status (optional)")
                }),
                vec!["label_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: UpdateLabelArgs = parse_args("update_label", arguments)?;
        self.client
            .labels()
            .update(&args.label_id, &args.request)
            .await?;
        Ok(CallToolResult::text("Label updated successfully"))
    }
}

/// Tool to delete a label
pub struct DeleteLabelTool {
    client: TodoistClient,
}

impl DeleteLabelTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteLabelTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_label".to_string(),
            description: "Delete a label".to_string(),
            input_schema: label_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: LabelIdArgs = parse_args("delete_label", arguments)?;
        self.client.labels().delete(&args.label_id).await?;
        Ok(CallToolResult::text("Label deleted successfully"))
    }
}
