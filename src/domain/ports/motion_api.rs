//! Port for the Motion REST API.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    RemoteProject, TaskPatch, TaskPayload, TaskUpdate, Workspace, WorkspaceStatus,
};

/// Typed operations against Motion.
///
/// A 404 is reported as `None` / [`TaskUpdate::NotFound`] where the caller
/// can recover from it; every other non-2xx response is an error. Nothing
/// is retried.
#[async_trait]
pub trait MotionApi: Send + Sync {
    /// Fetch a project, or `None` if Motion reports it missing.
    async fn get_project(&self, project_id: &str) -> DomainResult<Option<RemoteProject>>;

    /// Create a project and return its id.
    async fn create_project(&self, name: &str, workspace_id: &str) -> DomainResult<String>;

    /// Create a task and return its id.
    async fn create_task(&self, task: &TaskPayload) -> DomainResult<String>;

    /// Update an existing task.
    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> DomainResult<TaskUpdate>;

    /// List the statuses defined in a workspace.
    async fn list_workspace_statuses(&self, workspace_id: &str)
        -> DomainResult<Vec<WorkspaceStatus>>;

    /// List the workspaces visible to the API key.
    async fn list_workspaces(&self) -> DomainResult<Vec<Workspace>>;
}
