//! Labels API endpoints.

use crate::client::TodoistClient;
use crate::error::TodoistResult;
use serde::{Deserialize, Serialize};
use todoist_core::types::{Color, Label, ListResponse, ResourceId};
use tracing::debug;

/// Labels API for managing personal labels.
pub struct LabelsApi<'a> {
    client: &'a TodoistClient,
}

impl<'a> LabelsApi<'a> {
    pub(crate) fn new(client: &'a TodoistClient) -> Self {
        Self { client }
    }

    /// List all labels.
    pub async fn list(&self) -> TodoistResult<ListResponse<Label>> {
        debug!("Fetching labels");
        self.client.http.get("/labels").await
    }

    /// Create a new label.
    pub async fn create(&self, request: &CreateLabelRequest) -> TodoistResult<Label> {
        debug!(?request, "Creating label");
        self.client.http.post("/labels", request).await
    }

    /// Get a specific label by ID.
    pub async fn get(&self, label_id: &ResourceId) -> TodoistResult<Label> {
        debug!(%label_id, "Fetching label");
        self.client.http.get(&format!("/labels/{}", label_id)).await
    }

    /// Update a label. The API does not return the updated label.
    pub async fn update(&self, label_id: &ResourceId, request: &UpdateLabelRequest) -> TodoistResult<()> {
        debug!(%label_id, ?request, "Updating label");
        self.client
            .http
            .post_no_response(&format!("/labels/{}", label_id), request)
            .await
    }

    /// Delete a label.
    pub async fn delete(&self, label_id: &ResourceId) -> TodoistResult<()> {
        debug!(%label_id, "Deleting label");
        self.client
            .http
            .delete_no_response(&format!("/labels/{}", label_id))
            .await
    }
}

/// Request to create a new label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLabelRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

/// Request to update a label. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLabelRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}
