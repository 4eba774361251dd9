//! Tasks API endpoints.

use crate::api::{join_ids, QueryPairs};
use crate::client::TodoistClient;
use crate::error::TodoistResult;
use serde::{Deserialize, Serialize};
use todoist_core::types::{ListResponse, ResourceId, Task};
use tracing::debug;

/// Tasks API for managing active tasks.
pub struct TasksApi<'a> {
    client: &'a TodoistClient,
}

impl<'a> TasksApi<'a> {
    pub(crate) fn new(client: &'a TodoistClient) -> Self {
        Self { client }
    }

    /// List active tasks matching the filters.
    pub async fn list(&self, filters: &TaskFilters) -> TodoistResult<ListResponse<Task>> {
        debug!(?filters, "Fetching tasks");
        self.client
            .http
            .get_with_query("/tasks", &filters.query_pairs())
            .await
    }

    /// Create a new task.
    pub async fn create(&self, request: &CreateTaskRequest) -> TodoistResult<Task> {
        debug!(?request, "Creating task");
        self.client.http.post("/tasks", request).await
    }

    /// Get a specific task by ID.
    pub async fn get(&self, task_id: &ResourceId) -> TodoistResult<Task> {
        debug!(%task_id, "Fetching task");
        self.client.http.get(&format!("/tasks/{}", task_id)).await
    }

    /// Update a task. The API does not return the updated task.
    pub async fn update(&self, task_id: &ResourceId, request: &UpdateTaskRequest) -> TodoistResult<()> {
        debug!(%task_id, ?request, "Updating task");
        self.client
            .http
            .post_no_response(&format!("/tasks/{}", task_id), request)
            .await
    }

    /// Mark a task as completed.
    pub async fn close(&self, task_id: &ResourceId) -> TodoistResult<()> {
        debug!(%task_id, "Closing task");
        self.client.http.post_empty(&format!("/tasks/{}/close", task_id)).await
    }

    /// Reopen a completed task.
    pub async fn reopen(&self, task_id: &ResourceId) -> TodoistResult<()> {
        debug!(%task_id, "Reopening task");
        self.client.http.post_empty(&format!("/tasks/{}/reopen", task_id)).await
    }

    /// Delete a task.
    pub async fn delete(&self, task_id: &ResourceId) -> TodoistResult<()> {
        debug!(%task_id, "Deleting task");
        self.client
            .http
            .delete_no_response(&format!("/tasks/{}", task_id))
            .await
    }

    /// Create a task from a natural language description, e.g.
    /// `"Submit report by Friday 5pm #Work p2"`.
    pub async fn quick_add(&self, request: &QuickAddRequest) -> TodoistResult<Task> {
        debug!(?request, "Quick adding task");
        self.client.http.post("/quick/add", request).await
    }
}

/// Filters for listing tasks. Unset filters are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<ResourceId>,
    /// Todoist filter expression, e.g. `today | overdue`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<ResourceId>>,
}

impl TaskFilters {
    /// Query parameters for the set filters, in declaration order.
    pub fn query_pairs(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query.push_opt("project_id", self.project_id.as_ref());
        query.push_opt("section_id", self.section_id.as_ref());
        query.push_opt("label_id", self.label_id.as_ref());
        query.push_opt("filter", self.filter.as_ref());
        query.push_opt("ids", self.ids.as_deref().map(join_ids).as_ref());
        query
    }
}

/// Request to create a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub content: String,
    #[serde(flatten)]
    pub fields: TaskFields,
}

/// Request to update a task. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub fields: TaskFields,
}

/// Optional task attributes shared by create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<ResourceId>>,
    /// 1 (normal) to 4 (urgent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<ResourceId>,
}

/// Request for the quick add endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuickAddRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}
