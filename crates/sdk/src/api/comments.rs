//! Comments API endpoints.

use crate::api::QueryPairs;
use crate::client::TodoistClient;
use crate::error::TodoistResult;
use serde::{Deserialize, Serialize};
use todoist_core::types::{Comment, ListResponse, ResourceId};
use tracing::debug;

/// Comments API for task and project comments.
pub struct CommentsApi<'a> {
    client: &'a TodoistClient,
}

impl<'a> CommentsApi<'a> {
    pub(crate) fn new(client: &'a TodoistClient) -> Self {
        Self { client }
    }

    /// List comments of a task or a project.
    pub async fn list(
        &self,
        task_id: Option<&ResourceId>,
        project_id: Option<&ResourceId>,
    ) -> TodoistResult<ListResponse<Comment>> {
        debug!(?task_id, ?project_id, "Fetching comments");
        let mut query = QueryPairs::new();
        query.push_opt("task_id", task_id);
        query.push_opt("project_id", project_id);
        self.client.http.get_with_query("/comments", &query).await
    }

    /// Add a comment.
    pub async fn create(&self, request: &CreateCommentRequest) -> TodoistResult<Comment> {
        debug!(?request, "Creating comment");
        self.client.http.post("/comments", request).await
    }

    /// Get a specific comment by ID.
    pub async fn get(&self, comment_id: &ResourceId) -> TodoistResult<Comment> {
        debug!(%comment_id, "Fetching comment");
        self.client.http.get(&format!("/comments/{}", comment_id)).await
    }

    /// Update a comment. The API does not return the updated comment.
    pub async fn update(
        &self,
        comment_id: &ResourceId,
        request: &UpdateCommentRequest,
    ) -> TodoistResult<()> {
        debug!(%comment_id, ?request, "Updating comment");
        self.client
            .http
            .post_no_response(&format!("/comments/{}", comment_id), request)
            .await
    }

    /// Delete a comment.
    pub async fn delete(&self, comment_id: &ResourceId) -> TodoistResult<()> {
        debug!(%comment_id, "Deleting comment");
        self.client
            .http
            .delete_no_response(&format!("/comments/{}", comment_id))
            .await
    }
}

/// Request to add a comment. Either `task_id` or `project_id` should be set;
/// the API enforces this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<serde_json::Value>,
}

/// Request to update a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}
