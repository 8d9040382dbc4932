//! Reconciliation of GitHub repositories and issues with Motion.
//!
//! Decides, for a repository or an issue, whether the Motion object it is
//! bound to still exists and whether to create, update or recreate it.
//! Stale bindings are repaired in place for both projects and tasks.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    InsertOutcome, Issue, IssueTaskMapping, RepoProjectMapping, Repository, TaskPayload,
    TaskUpdate,
};
use crate::domain::ports::{MappingStore, MotionApi};
use crate::services::status_resolver::StatusResolver;

/// What [`ReconciliationService::sync_issue`] did on the Motion side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// First sync: a task was created and bound to the issue.
    Created { task_id: String },
    /// The bound task was updated.
    Updated { task_id: String },
    /// The bound task had disappeared; a new one was created and rebound.
    Recreated { stale_task_id: String, task_id: String },
}

impl SyncOutcome {
    /// Id of the task now bound to the issue.
    pub fn task_id(&self) -> &str {
        match self {
            Self::Created { task_id }
            | Self::Updated { task_id }
            | Self::Recreated { task_id, .. } => task_id,
        }
    }
}

/// Orchestrates the mapping store, Motion and the status resolver.
///
/// Holds no per-event state: every call re-reads the store.
pub struct ReconciliationService {
    store: Arc<dyn MappingStore>,
    motion: Arc<dyn MotionApi>,
    statuses: StatusResolver,
}

impl ReconciliationService {
    pub fn new(store: Arc<dyn MappingStore>, motion: Arc<dyn MotionApi>) -> Self {
        let statuses = StatusResolver::new(Arc::clone(&store), Arc::clone(&motion));
        Self {
            store,
            motion,
            statuses,
        }
    }

    /// Return the Motion project id that represents a repository.
    ///
    /// A live binding is returned as is without writing anything. A binding
    /// whose project is gone gets a new project and is updated in place. A
    /// repository seen for the first time gets a new project and mapping.
    #[instrument(skip(self, repo), fields(repo_id = repo.id, repo = %repo.full_name))]
    pub async fn resolve_project(
        &self,
        repo: &Repository,
        workspace_id: &str,
        owner_user_id: &str,
    ) -> DomainResult<String> {
        if let Some(mapping) = self.store.get_project_mapping(repo.id).await? {
            if self.motion.get_project(&mapping.project_id).await?.is_some() {
                return Ok(mapping.project_id);
            }

            warn!(stale_project_id = %mapping.project_id, "mapped project no longer exists, recreating");
            let project_id = self.create_project(repo, workspace_id).await?;
            self.store
                .update_project_mapping(repo.id, owner_user_id, &project_id)
                .await?;
            info!(%project_id, "rebound repository to new project");
            return Ok(project_id);
        }

        info!("no project mapping, creating project");
        let project_id = self.create_project(repo, workspace_id).await?;
        let mapping = RepoProjectMapping::new(
            repo.id,
            &repo.name,
            &repo.full_name,
            &project_id,
            owner_user_id,
        );

        match self.store.insert_project_mapping(&mapping).await? {
            InsertOutcome::Inserted => {
                info!(%project_id, "inserted project mapping");
                Ok(project_id)
            }
            InsertOutcome::AlreadyExists(existing) => {
                warn!(
                    orphaned_project_id = %project_id,
                    project_id = %existing.project_id,
                    "project mapping created concurrently, using existing binding"
                );
                Ok(existing.project_id)
            }
        }
    }

    /// Create or update the Motion task that mirrors an issue.
    #[instrument(skip(self, issue), fields(issue_id = issue.id, state = %issue.state))]
    pub async fn sync_issue(
        &self,
        issue: &Issue,
        repo_id: i64,
        project_id: &str,
        workspace_id: &str,
        owner_user_id: &str,
    ) -> DomainResult<SyncOutcome> {
        let statuses = self.statuses.resolve_statuses(workspace_id).await?;
        let payload = TaskPayload {
            name: issue.title.clone(),
            description: issue.task_description(),
            status: statuses.for_issue_state(&issue.state).to_string(),
            project_id: project_id.to_string(),
            workspace_id: workspace_id.to_string(),
        };

        let Some(mapping) = self.store.get_task_mapping(issue.id).await? else {
            return self
                .create_and_bind(issue, repo_id, owner_user_id, &payload)
                .await;
        };

        match self
            .motion
            .update_task(&mapping.task_id, &payload.without_workspace())
            .await?
        {
            TaskUpdate::Updated => {
                info!(task_id = %mapping.task_id, "updated task");
                Ok(SyncOutcome::Updated {
                    task_id: mapping.task_id,
                })
            }
            TaskUpdate::NotFound => {
                warn!(stale_task_id = %mapping.task_id, "mapped task no longer exists, recreating");
                let task_id = self.motion.create_task(&payload).await?;
                self.store.update_task_mapping(issue.id, &task_id).await?;
                info!(%task_id, "rebound issue to new task");
                Ok(SyncOutcome::Recreated {
                    stale_task_id: mapping.task_id,
                    task_id,
                })
            }
        }
    }

    /// First sync of an issue: create the task and insert the mapping.
    async fn create_and_bind(
        &self,
        issue: &Issue,
        repo_id: i64,
        owner_user_id: &str,
        payload: &TaskPayload,
    ) -> DomainResult<SyncOutcome> {
        let task_id = self.motion.create_task(payload).await?;
        let mapping = IssueTaskMapping::new(issue.id, owner_user_id, &task_id, repo_id);

        match self.store.insert_task_mapping(&mapping).await? {
            InsertOutcome::Inserted => {
                info!(%task_id, "created task and inserted mapping");
                Ok(SyncOutcome::Created { task_id })
            }
            InsertOutcome::AlreadyExists(existing) => {
                warn!(
                    orphaned_task_id = %task_id,
                    task_id = %existing.task_id,
                    "task mapping created concurrently, using existing binding"
                );
                Ok(SyncOutcome::Created {
                    task_id: existing.task_id,
                })
            }
        }
    }

    /// Create the project for a repository, priming the workspace statuses first.
    async fn create_project(&self, repo: &Repository, workspace_id: &str) -> DomainResult<String> {
        self.statuses.resolve_statuses(workspace_id).await?;
        self.motion.create_project(&repo.name, workspace_id).await
    }
}
