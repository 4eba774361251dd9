// Project tools

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    created_result, json_result, json_schema_boolean, json_schema_number, json_schema_object,
    json_schema_string, parse_args, Tool,
};
use serde::Deserialize;
use serde_json::{json, Value};
use todoist_core::types::ResourceId;
use todoist_sdk::api::{CreateProjectRequest, UpdateProjectRequest};
use todoist_sdk::TodoistClient;

#[derive(Debug, Deserialize)]
struct ProjectIdArgs {
    project_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct UpdateProjectArgs {
    project_id: ResourceId,
    #[serde(flatten)]
    request: UpdateProjectRequest,
}

fn project_id_schema() -> Value {
    json_schema_object(
        json!({ "project_id": json_schema_number("Project ID") }),
        vec!["project_id"],
    )
}

/// Tool to list all projects
pub struct ListProjectsTool {
    client: TodoistClient,
}

impl ListProjectsTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListProjectsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_projects".to_string(),
            description: "List all Todoist projects".to_string(),
            input_schema: json_schema_object(json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult, ToolError> {
        let projects = self.client.projects().list().await?;
        json_result(&projects)
    }
}

/// Tool to create a project
pub struct CreateProjectTool {
    client: TodoistClient,
}

impl CreateProjectTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CreateProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_project".to_string(),
            description: "Create a new Todoist project".to_string(),
            input_schema: json_schema_object(
                json!({
                    "name": json_schema_string("Project name"),
                    "parent_id": json_schema_number("Parent project ID (optional)"),
                    "color": json_schema_number("Color ID (optional)"),
                    "favorite": json_schema_boolean("Mark as favorite (optional)")
                }),
                vec!["name"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let request: CreateProjectRequest = parse_args("create_project", arguments)?;
        let project = self.client.projects().create(&request).await?;
        created_result("Project created successfully", &project)
    }
}

/// Tool to fetch a single project
pub struct GetProjectTool {
    client: TodoistClient,
}

impl GetProjectTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_project".to_string(),
            description: "Get a specific Todoist project by ID".to_string(),
            input_schema: project_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: ProjectIdArgs = parse_args("get_project", arguments)?;
        let project = self.client.projects().get(&args.project_id).await?;
        json_result(&project)
    }
}

/// Tool to update a project
pub struct UpdateProjectTool {
    client: TodoistClient,
}

impl UpdateProjectTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for UpdateProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "update_project".to_string(),
            description: "Update a Todoist project".to_string(),
            input_schema: json_schema_object(
                json!({
                    "project_id": json_schema_number("Project ID"),
                    "name": json_schema_string("New project name (optional)"),
                    "color": json_schema_number("Color ID (optional)"),
                    "favorite": json_schema_boolean("Favorite status (optional)")
                }),
                vec!["project_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: UpdateProjectArgs = parse_args("update_project", arguments)?;
        self.client
            .projects()
            .update(&args.project_id, &args.request)
            .await?;
        Ok(CallToolResult::text("Project updated successfully"))
    }
}

/// Tool to delete a project
pub struct DeleteProjectTool {
    client: TodoistClient,
}

impl DeleteProjectTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteProjectTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_project".to_string(),
            description: "Delete a Todoist project".to_string(),
            input_schema: project_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: ProjectIdArgs = parse_args("delete_project", arguments)?;
        self.client.projects().delete(&args.project_id).await?;
        Ok(CallToolResult::text("Project deleted successfully"))
    }
}

/// Tool to list the collaborators of a shared project
pub struct GetProjectCollaboratorsTool {
    client: TodoistClient,
}

impl GetProjectCollaboratorsTool {
    pub fn new(client: TodoistClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetProjectCollaboratorsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_project_collaborators".to_string(),
            description: "Get collaborators for a specific project".to_string(),
            input_schema: project_id_schema(),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let args: ProjectIdArgs = parse_args("get_project_collaborators", arguments)?;
        let collaborators = self
            .client
            .projects()
            .collaborators(&args.project_id)
            .await?;
        json_result(&collaborators)
    }
}
