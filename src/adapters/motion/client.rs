//! Motion HTTP client.
//!
//! Wraps the Motion REST API v1, providing the typed operations the
//! reconciliation engine needs. Every call is a single attempt: a failed
//! request surfaces immediately as [`DomainError::RemoteRequestFailed`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use tracing::{debug, error, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    MotionConfig, RemoteProject, TaskPatch, TaskPayload, TaskUpdate, Workspace, WorkspaceStatus,
};
use crate::domain::ports::MotionApi;

use super::models::{CreateProjectRequest, CreatedResource, WorkspacesResponse};

/// Base URL for the Motion API v1.
pub const MOTION_API_BASE: &str = "https://api.usemotion.com/v1";

/// Configuration for the Motion HTTP client.
#[derive(Debug, Clone)]
pub struct MotionClientConfig {
    /// Motion API key, sent as `X-API-Key`.
    pub api_key: String,
    /// Base URL of the Motion API.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl MotionClientConfig {
    /// Config with the default endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: MOTION_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }

    /// Override the base URL (tests point this at a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl From<&MotionConfig> for MotionClientConfig {
    fn from(config: &MotionConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP client for the Motion REST API.
#[derive(Debug, Clone)]
pub struct MotionClient {
    /// The underlying HTTP client.
    http: Client,
    /// Motion API key.
    api_key: String,
    /// Parsed base URL; endpoint ids are appended as escaped path segments.
    base_url: Url,
}

impl MotionClient {
    /// Build a client from explicit configuration.
    pub fn new(config: MotionClientConfig) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::RemoteRequestFailed(format!("Failed to build HTTP client: {e}"))
            })?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DomainError::RemoteRequestFailed(format!(
                "Invalid Motion base URL {}: {e}",
                config.base_url
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::RemoteRequestFailed(format!(
                "Invalid Motion base URL {}",
                config.base_url
            )));
        }

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url,
        })
    }

    /// Resolve an endpoint under the base URL, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Build an authorized request for an endpoint under the base URL.
    fn request(&self, method: reqwest::Method, segments: &[&str]) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.endpoint(segments))
            .header("X-API-Key", &self.api_key)
            .header("Content-Type", "application/json")
    }

    /// Send a request, mapping transport errors.
    async fn send(&self, operation: &str, req: reqwest::RequestBuilder) -> DomainResult<Response> {
        req.send().await.map_err(|e| {
            DomainError::RemoteRequestFailed(format!("Motion {operation} request failed: {e}"))
        })
    }

    /// Decode a JSON body, mapping parse errors.
    async fn parse<T: serde::de::DeserializeOwned>(
        operation: &str,
        resp: Response,
    ) -> DomainResult<T> {
        resp.json::<T>().await.map_err(|e| {
            DomainError::RemoteRequestFailed(format!("Motion {operation} parse failed: {e}"))
        })
    }
}

/// Turn a non-success response into an error carrying status and body.
async fn failure(operation: &str, resp: Response) -> DomainError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    error!(operation, %status, body = %body, "Motion request failed");
    DomainError::RemoteRequestFailed(format!("Motion {operation} returned {status}: {body}"))
}

#[async_trait]
impl MotionApi for MotionClient {
    async fn get_project(&self, project_id: &str) -> DomainResult<Option<RemoteProject>> {
        let req = self.request(reqwest::Method::GET, &["projects", project_id]);
        let resp = self.send("get_project", req).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            warn!(project_id, "Motion project not found");
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(failure("get_project", resp).await);
        }

        Self::parse("get_project", resp).await.map(Some)
    }

    async fn create_project(&self, name: &str, workspace_id: &str) -> DomainResult<String> {
        let body = CreateProjectRequest {
            name: name.to_string(),
            workspace_id: workspace_id.to_string(),
        };
        let req = self.request(reqwest::Method::POST, &["projects"]).json(&body);
        let resp = self.send("create_project", req).await?;

        if !resp.status().is_success() {
            return Err(failure("create_project", resp).await);
        }

        let created: CreatedResource = Self::parse("create_project", resp).await?;
        debug!(project_id = %created.id, "created Motion project");
        Ok(created.id)
    }

    async fn create_task(&self, task: &TaskPayload) -> DomainResult<String> {
        let req = self.request(reqwest::Method::POST, &["tasks"]).json(task);
        let resp = self.send("create_task", req).await?;

        if !resp.status().is_success() {
            return Err(failure("create_task", resp).await);
        }

        let created: CreatedResource = Self::parse("create_task", resp).await?;
        debug!(task_id = %created.id, "created Motion task");
        Ok(created.id)
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> DomainResult<TaskUpdate> {
        let req = self
            .request(reqwest::Method::PATCH, &["tasks", task_id])
            .json(patch);
        let resp = self.send("update_task", req).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            warn!(task_id, "Motion task not found");
            return Ok(TaskUpdate::NotFound);
        }
        if !resp.status().is_success() {
            return Err(failure("update_task", resp).await);
        }

        debug!(task_id, "updated Motion task");
        Ok(TaskUpdate::Updated)
    }

    async fn list_workspace_statuses(
        &self,
        workspace_id: &str,
    ) -> DomainResult<Vec<WorkspaceStatus>> {
        let req = self
            .request(reqwest::Method::GET, &["statuses"])
            .query(&[("workspaceId", workspace_id)]);
        let resp = self.send("list_workspace_statuses", req).await?;

        if !resp.status().is_success() {
            return Err(failure("list_workspace_statuses", resp).await);
        }

        Self::parse("list_workspace_statuses", resp).await
    }

    async fn list_workspaces(&self) -> DomainResult<Vec<Workspace>> {
        let req = self.request(reqwest::Method::GET, &["workspaces"]);
        let resp = self.send("list_workspaces", req).await?;

        if !resp.status().is_success() {
            return Err(failure("list_workspaces", resp).await);
        }

        let body: WorkspacesResponse = Self::parse("list_workspaces", resp).await?;
        Ok(body.workspaces)
    }
}
