//! Completed tasks and productivity statistics.

use crate::api::QueryPairs;
use crate::client::TodoistClient;
use crate::error::TodoistResult;
use serde::{Deserialize, Serialize};
use todoist_core::types::{CompletedTasksResponse, ProductivityStats, ResourceId};
use tracing::debug;

/// Completed API for finished tasks and karma statistics.
pub struct CompletedApi<'a> {
    client: &'a TodoistClient,
}

impl<'a> CompletedApi<'a> {
    pub(crate) fn new(client: &'a TodoistClient) -> Self {
        Self { client }
    }

    /// List completed tasks across all projects. Only `limit` and `since`
    /// are sent.
    pub async fn all(&self, filters: &CompletionFilters) -> TodoistResult<CompletedTasksResponse> {
        debug!(?filters, "Fetching completed tasks");
        let mut query = QueryPairs::new();
        query.push_opt("limit", filters.limit.as_ref());
        query.push_opt("since", filters.since.as_ref());
        self.client
            .http
            .get_with_query("/completed/get_all", &query)
            .await
    }

    /// List completed tasks of one project. Only `limit` and `until` are
    /// sent alongside the project.
    pub async fn by_project(
        &self,
        project_id: &ResourceId,
        filters: &CompletionFilters,
    ) -> TodoistResult<CompletedTasksResponse> {
        debug!(%project_id, ?filters, "Fetching completed tasks for project");
        let mut query = QueryPairs::new();
        query.push_opt("project_id", Some(project_id));
        query.push_opt("limit", filters.limit.as_ref());
        query.push_opt("until", filters.until.as_ref());
        self.client
            .http
            .get_with_query("/completed/get_project", &query)
            .await
    }

    /// Karma and completion statistics.
    pub async fn stats(&self) -> TodoistResult<ProductivityStats> {
        debug!("Fetching productivity stats");
        self.client.http.get("/completed/get_stats").await
    }
}

/// Filters for the completed-task listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Lower bound, e.g. `2024-01-01T00:00`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}
