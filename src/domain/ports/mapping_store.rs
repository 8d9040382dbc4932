//! Repository port for mapping persistence.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    InsertOutcome, IssueTaskMapping, RepoProjectMapping, WorkspaceStatusConfig,
};

/// Durable store for repo→project, issue→task and workspace→status records.
///
/// Every operation is a point lookup or write by unique key. Inserts are
/// conditional: when the key is already taken nothing is written and the
/// existing row is returned.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Get the project mapping for a repository.
    async fn get_project_mapping(&self, repo_id: i64) -> DomainResult<Option<RepoProjectMapping>>;

    /// Insert a project mapping unless one already exists for the repository.
    async fn insert_project_mapping(
        &self,
        mapping: &RepoProjectMapping,
    ) -> DomainResult<InsertOutcome<RepoProjectMapping>>;

    /// Point an existing project mapping at a new project.
    async fn update_project_mapping(
        &self,
        repo_id: i64,
        owner_user_id: &str,
        project_id: &str,
    ) -> DomainResult<()>;

    /// Get the task mapping for an issue.
    async fn get_task_mapping(&self, issue_id: i64) -> DomainResult<Option<IssueTaskMapping>>;

    /// Insert a task mapping unless one already exists for the issue.
    async fn insert_task_mapping(
        &self,
        mapping: &IssueTaskMapping,
    ) -> DomainResult<InsertOutcome<IssueTaskMapping>>;

    /// Point an existing task mapping at a new task.
    async fn update_task_mapping(&self, issue_id: i64, task_id: &str) -> DomainResult<()>;

    /// Get the cached status labels for a workspace.
    async fn get_workspace_config(
        &self,
        workspace_id: &str,
    ) -> DomainResult<Option<WorkspaceStatusConfig>>;

    /// Insert status labels for a workspace unless already cached.
    async fn insert_workspace_config(
        &self,
        config: &WorkspaceStatusConfig,
    ) -> DomainResult<InsertOutcome<WorkspaceStatusConfig>>;
}
