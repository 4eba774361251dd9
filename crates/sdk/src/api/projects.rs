//! Projects API endpoints.

use crate::client::TodoistClient;
use crate::error::TodoistResult;
use serde::{Deserialize, Serialize};
use todoist_core::types::{Collaborator, Color, ListResponse, Project, ResourceId};
use tracing::debug;

/// Projects API for managing projects.
pub struct ProjectsApi<'a> {
    client: &'a TodoistClient,
}

impl<'a> ProjectsApi<'a> {
    pub(crate) fn new(client: &'a TodoistClient) -> Self {
        Self { client }
    }

    /// List all projects.
    pub async fn list(&self) -> TodoistResult<ListResponse<Project>> {
        debug!("Fetching all projects");
        self.client.http.get("/projects").await
    }

    /// Create a new project.
    pub async fn create(&self, request: &CreateProjectRequest) -> TodoistResult<Project> {
        debug!(?request, "Creating project");
        self.client.http.post("/projects", request).await
    }

    /// Get a specific project by ID.
    pub async fn get(&self, project_id: &ResourceId) -> TodoistResult<Project> {
        debug!(%project_id, "Fetching project");
        self.client.http.get(&format!("/projects/{}", project_id)).await
    }

    /// Update a project. The API does not return the updated project.
    pub async fn update(
        &self,
        project_id: &ResourceId,
        request: &UpdateProjectRequest,
    ) -> TodoistResult<()> {
        debug!(%project_id, ?request, "Updating project");
        self.client
            .http
            .post_no_response(&format!("/projects/{}", project_id), request)
            .await
    }

    /// Delete a project.
    pub async fn delete(&self, project_id: &ResourceId) -> TodoistResult<()> {
        debug!(%project_id, "Deleting project");
        self.client
            .http
            .delete_no_response(&format!("/projects/{}", project_id))
            .await
    }

    /// List the collaborators of a shared project.
    pub async fn collaborators(
        &self,
        project_id: &ResourceId,
    ) -> TodoistResult<ListResponse<Collaborator>> {
        debug!(%project_id, "Fetching project collaborators");
        self.client
            .http
            .get(&format!("/projects/{}/collaborators", project_id))
            .await
    }
}

/// Request to create a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

/// Request to update a project. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}
