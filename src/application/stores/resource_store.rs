//! CRUD pass-through for project-scoped resources.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::application::services::ApiClient;
use crate::domain::entities::{ItemId, ProjectId};
use crate::domain::errors::ApiError;
use crate::domain::http::ApiResponse;

/// Path segment of the project investment items resource.
pub const INVESTMENT_ITEMS: &str = "te-investment-item";

/// CRUD operations on `/api/v1/project/{project}/{resource}`.
///
/// Every call forwards to the API client unchanged; there is no local state.
#[derive(Clone)]
pub struct ProjectResourceStore {
    api: Arc<ApiClient>,
    resource: String,
}

impl ProjectResourceStore {
    /// Store for the `resource` path segment of a project.
    #[must_use]
    pub fn new(api: Arc<ApiClient>, resource: impl Into<String>) -> Self {
        Self {
            api,
            resource: resource.into(),
        }
    }

    /// Store for project investment items.
    #[must_use]
    pub fn investments(api: Arc<ApiClient>) -> Self {
        Self::new(api, INVESTMENT_ITEMS)
    }

    /// Resource path segment.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Lists records of a project.
    ///
    /// # Errors
    /// Returns whatever the API client reports.
    pub async fn fetch_all(&self, project: &ProjectId) -> Result<ApiResponse, ApiError> {
        debug!(resource = %self.resource, project = %project, "Fetching records");
        self.api
            .get(
                &self.collection_path(project),
                &[("project_id", project.as_str())],
            )
            .await
    }

    /// Creates a record.
    ///
    /// # Errors
    /// Returns whatever the API client reports.
    pub async fn create(
        &self,
        project: &ProjectId,
        payload: Value,
    ) -> Result<ApiResponse, ApiError> {
        debug!(resource = %self.resource, project = %project, "Creating record");
        self.api.post(&self.collection_path(project), payload).await
    }

    /// Replaces a record.
    ///
    /// # Errors
    /// Returns whatever the API client reports.
    pub async fn update(
        &self,
        project: &ProjectId,
        id: &ItemId,
        payload: Value,
    ) -> Result<ApiResponse, ApiError> {
        debug!(resource = %self.resource, project = %project, id = %id, "Updating record");
        self.api.put(&self.item_path(project, id), payload).await
    }

    /// Deletes a record.
    ///
    /// # Errors
    /// Returns whatever the API client reports.
    pub async fn remove(&self, project: &ProjectId, id: &ItemId) -> Result<ApiResponse, ApiError> {
        debug!(resource = %self.resource, project = %project, id = %id, "Deleting record");
        self.api.delete(&self.item_path(project, id)).await
    }

    fn collection_path(&self, project: &ProjectId) -> String {
        format!("/api/v1/project/{project}/{}", self.resource)
    }

    fn item_path(&self, project: &ProjectId, id: &ItemId) -> String {
        format!("{}/{id}", self.collection_path(project))
    }
}
