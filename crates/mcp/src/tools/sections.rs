// Section tools

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    created_result, json_result, json_schema_number, json_schema_object, json_schema_string,
    parse_args, Tool,
};
use serde::Deserialize;
use serde_json::{json, Value};
use todoist_core::types::ResourceId;
use todoist_sdk::api::{CreateSectionRequest, UpdateSectionRequest};
use todoist_sdk::TodoistClient;

#[derive(Debug, Deserialize)]
struct ListSectionsArgs {
    #[serde(default)]
    project_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
struct SectionIdArgs {
    section_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct UpdateSectionArgs {
    section_id: ResourceId,
    #[serde(flatten)]
    request: UpdateSectionRequest,
}

fn section_id_schema() -> Value {
    json_schema_object(
        json!({ "section_id": json_schema_number("Section ID") }),
        vec!["section_id"],
    )
}

/// Tool to list sections
pub struct ListSectionsTool {
    client: TodoistClient,
}

impl ListSectionsTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListSectionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_sections".to_string(),
            description: "List sections, optionally filtered by project".to_string(),
            input_schema: json_schema_object(
                json!({ "project_id": json_schema_number("Project ID to filter by (optional)") }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: ListSectionsArgs = parse_args("list_sections", arguments)?;
        let sections = self.client.sections().list(args.project_id.as_ref()).await?;
        json_result(&sections)
    }
}

/// Tool to create a section
pub struct CreateSectionTool {
    client: TodoistClient,
}

impl CreateSectionTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateSectionTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_section".to_string(),
            description: "Create a new section in a project".to_string(),
            input_schema: json_schema_object(
                json!({
                    "name": json_schema_string("Section name"),
                    "project_id": json_schema_number("Project ID"),
                    "order": json_schema_number("Sort order (optional)")
                }),
                vec!["name", "project_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let request: CreateSectionRequest = parse_args("create_section", arguments)?;
        let section = self.client.sections().create(&request).await?;
        created_result("Section created successfully", &section)
    }
}

/// Tool to fetch a single section
pub struct GetSectionTool {
    client: TodoistClient,
}

impl GetSectionTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetSectionTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_section".to_string(),
            description: "Get a specific section by ID".to_string(),
            input_schema: section_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: SectionIdArgs = parse_args("get_section", arguments)?;
        let section = self.client.sections().get(&args.section_id).await?;
        json_result(&section)
    }
}

/// Tool to rename or reorder a section
pub struct UpdateSectionTool {
    client: TodoistClient,
}

impl UpdateSectionTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateSectionTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "update_section".to_string(),
            description: "Update a section".to_string(),
            input_schema: json_schema_object(
                json!({
                    "section_id": json_schema_number("Section ID"),
                    "name": json_schema_string("New section name (optional)"),
                    "order": json_schema_number("New sort order (optional)")
                }),
                vec!["section_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: UpdateSectionArgs = parse_args("update_section", arguments)?;
        self.client
            .sections()
            .update(&args.section_id, &args.request)
            .await?;
        Ok(CallToolResult::text("Section updated successfully"))
    }
}

/// Tool to delete a section
pub struct DeleteSectionTool {
    client: TodoistClient,
}

impl DeleteSectionTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteSectionTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_section".to_string(),
            description: "Delete a section".to_string(),
            input_schema: section_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: SectionIdArgs = parse_args("delete_section", arguments)?;
        self.client.sections().delete(&args.section_id).await?;
        Ok(CallToolResult::text("Section deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::test_client;
    use wiremock::matchers::{method, path, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_sections_without_project() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sections"))
            .and(query_param_is_missing("project_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let tool = ListSectionsTool::new(test_client(&server));
        let result = tool.execute(Value::Null).await.unwrap();

        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn test_create_section_requires_project() {
        let server = MockServer::start().await;
        let tool = CreateSectionTool::new(test_client(&server));

        let err = tool.execute(json!({"name": "Later"})).await.unwrap_err();
        assert!(err.to_string().contains("project_id"));
    }
}
