//! Sections API endpoints.

use crate::api::QueryPairs;
use crate::client::TodoistClient;
use crate::error::TodoistResult;
use serde::{Deserialize, Serialize};
use todoist_core::types::{ListResponse, ResourceId, Section};
use tracing::debug;

/// Sections API for managing project sections.
pub struct SectionsApi<'a> {
    client: &'a TodoistClient,
}

impl<'a> SectionsApi<'a> {
    pub(crate) fn new(client: &'a TodoistClient) -> Self {
        Self { client }
    }

    /// List sections, optionally only those of one project.
    pub async fn list(
        &self,
        project_id: Option<&ResourceId>,
    ) -> TodoistResult<ListResponse<Section>> {
        debug!(?project_id, "Fetching sections");
        let mut query = QueryPairs::new();
        query.push_opt("project_id", project_id);
        self.client.http.get_with_query("/sections", &query).await
    }

    /// Create a new section.
    pub async fn create(&self, request: &CreateSectionRequest) -> TodoistResult<Section> {
        debug!(?request, "Creating section");
        self.client.http.post("/sections", request).await
    }

    /// Get a specific section by ID.
    pub async fn get(&self, section_id: &ResourceId) -> TodoistResult<Section> {
        debug!(%section_id, "Fetching section");
        self.client.http.get(&format!("/sections/{}", section_id)).await
    }

    /// Update a section. The API does not return the updated section.
    pub async fn update(
        &self,
        section_id: &ResourceId,
        request: &UpdateSectionRequest,
    ) -> TodoistResult<()> {
        debug!(%section_id, ?request, "Updating section");
        self.client
            .http
            .post_no_response(&format!("/sections/{}", section_id), request)
            .await
    }

    /// Delete a section.
    pub async fn delete(&self, section_id: &ResourceId) -> TodoistResult<()> {
        debug!(%section_id, "Deleting section");
        self.client
            .http
            .delete_no_response(&format!("/sections/{}", section_id))
            .await
    }
}

/// Request to create a new section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSectionRequest {
    pub name: String,
    pub project_id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Request to update a section. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSectionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_sections_for_project() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sections"))
            .and(query_param("project_id", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "7025", "project_id": "42", "order": 1, "name": "Groceries"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let sections = client
            .sections()
            .list(Some(&ResourceId::from(42)))
            .await
            .unwrap();

        assert_eq!(sections.items()[0].name(), Some("Groceries"));
    }

    #[tokio::test]
    async fn test_list_all_sections_has_no_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sections"))
            .and(query_param_is_missing("project_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(client.sections().list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_section() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sections"))
            .and(body_json(json!({"name": "Groceries", "project_id": 42})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": "7025", "project_id": 42, "order": 1, "name": "Groceries"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = CreateSectionRequest {
            name: "Groceries".to_string(),
            project_id: ResourceId::from(42),
            order: None,
        };

        let section = client.sections().create(&request).await.unwrap();
        assert_eq!(section.project_id(), Some(ResourceId::from(42)));
    }
}
