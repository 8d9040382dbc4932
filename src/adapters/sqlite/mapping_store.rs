//! SQLite adapter for MappingStore.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::adapters::sqlite::parse_datetime;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    InsertOutcome, IssueTaskMapping, RepoProjectMapping, WorkspaceStatusConfig,
};
use crate::domain::ports::MappingStore;

#[derive(Clone)]
pub struct SqliteMappingStore {
    pool: SqlitePool,
}

impl SqliteMappingStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RepoProjectRow {
    github_repo_id: i64,
    github_repo_name: String,
    github_repo_full_name: String,
    motion_project_id: String,
    github_user_id: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<RepoProjectRow> for RepoProjectMapping {
    type Error = DomainError;

    fn try_from(row: RepoProjectRow) -> DomainResult<Self> {
        Ok(Self {
            repo_id: row.github_repo_id,
            repo_name: row.github_repo_name,
            repo_full_name: row.github_repo_full_name,
            project_id: row.motion_project_id,
            owner_user_id: row.github_user_id,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct IssueTaskRow {
    github_issue_id: i64,
    github_user_id: String,
    motion_task_id: String,
    github_repo_id: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<IssueTaskRow> for IssueTaskMapping {
    type Error = DomainError;

    fn try_from(row: IssueTaskRow) -> DomainResult<Self> {
        Ok(Self {
            issue_id: row.github_issue_id,
            owner_user_id: row.github_user_id,
            task_id: row.motion_task_id,
            repo_id: row.github_repo_id,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WorkspaceRow {
    motion_workspace_id: String,
    default_status: String,
    resolve_status: String,
    created_at: String,
}

impl TryFrom<WorkspaceRow> for WorkspaceStatusConfig {
    type Error = DomainError;

    fn try_from(row: WorkspaceRow) -> DomainResult<Self> {
        Ok(Self {
            workspace_id: row.motion_workspace_id,
            default_status: row.default_status,
            resolved_status: row.resolve_status,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

/// Turn a conditional insert into an [`InsertOutcome`], re-reading the winner on conflict.
///
/// A conflict whose winning row cannot be read back is an error.
fn outcome<T>(rows_affected: u64, existing: Option<T>) -> DomainResult<InsertOutcome<T>> {
    match (rows_affected, existing) {
        (0, Some(row)) => Ok(InsertOutcome::AlreadyExists(row)),
        (0, None) => Err(DomainError::DatabaseError(
            "insert conflicted but the existing row vanished".to_string(),
        )),
        _ => Ok(InsertOutcome::Inserted),
    }
}

#[async_trait]
impl MappingStore for SqliteMappingStore {
    async fn get_project_mapping(&self, repo_id: i64) -> DomainResult<Option<RepoProjectMapping>> {
        let row: Option<RepoProjectRow> =
            sqlx::query_as("SELECT * FROM repo_project_map WHERE github_repo_id = ?")
                .bind(repo_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(RepoProjectMapping::try_from).transpose()
    }

    async fn insert_project_mapping(
        &self,
        mapping: &RepoProjectMapping,
    ) -> DomainResult<InsertOutcome<RepoProjectMapping>> {
        let result = sqlx::query(
            "INSERT INTO repo_project_map
             (github_repo_id, github_repo_name, github_repo_full_name,
              motion_project_id, github_user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(github_repo_id) DO NOTHING",
        )
        .bind(mapping.repo_id)
        .bind(&mapping.repo_name)
        .bind(&mapping.repo_full_name)
        .bind(&mapping.project_id)
        .bind(&mapping.owner_user_id)
        .bind(mapping.created_at.to_rfc3339())
        .bind(mapping.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let existing = if result.rows_affected() == 0 {
            self.get_project_mapping(mapping.repo_id).await?
        } else {
            None
        };
        outcome(result.rows_affected(), existing)
    }

    async fn update_project_mapping(
        &self,
        repo_id: i64,
        owner_user_id: &str,
        project_id: &str,
    ) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE repo_project_map SET motion_project_id = ?1, updated_at = ?2
             WHERE github_repo_id = ?3 AND github_user_id = ?4",
        )
        .bind(project_id)
        .bind(Utc::now().to_rfc3339())
        .bind(repo_id)
        .bind(owner_user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(repo_id, owner_user_id, "no project mapping updated");
        }
        Ok(())
    }

    async fn get_task_mapping(&self, issue_id: i64) -> DomainResult<Option<IssueTaskMapping>> {
        let row: Option<IssueTaskRow> =
            sqlx::query_as("SELECT * FROM issue_task_map WHERE github_issue_id = ?")
                .bind(issue_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(IssueTaskMapping::try_from).transpose()
    }

    async fn insert_task_mapping(
        &self,
        mapping: &IssueTaskMapping,
    ) -> DomainResult<InsertOutcome<IssueTaskMapping>> {
        let result = sqlx::query(
            "INSERT INTO issue_task_map
             (github_issue_id, github_user_id, motion_task_id, github_repo_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(github_issue_id) DO NOTHING",
        )
        .bind(mapping.issue_id)
        .bind(&mapping.owner_user_id)
        .bind(&mapping.task_id)
        .bind(mapping.repo_id)
        .bind(mapping.created_at.to_rfc3339())
        .bind(mapping.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let existing = if result.rows_affected() == 0 {
            self.get_task_mapping(mapping.issue_id).await?
        } else {
            None
        };
        outcome(result.rows_affected(), existing)
    }

    async fn update_task_mapping(&self, issue_id: i64, task_id: &str) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE issue_task_map SET motion_task_id = ?1, updated_at = ?2 WHERE github_issue_id = ?3",
        )
        .bind(task_id)
        .bind(Utc::now().to_rfc3339())
        .bind(issue_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(issue_id, "no task mapping updated");
        }
        Ok(())
    }

    async fn get_workspace_config(
        &self,
        workspace_id: &str,
    ) -> DomainResult<Option<WorkspaceStatusConfig>> {
        let row: Option<WorkspaceRow> =
            sqlx::query_as("SELECT * FROM motion_workspace WHERE motion_workspace_id = ?")
                .bind(workspace_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(WorkspaceStatusConfig::try_from).transpose()
    }

    async fn insert_workspace_config(
        &self,
        config: &WorkspaceStatusConfig,
    ) -> DomainResult<InsertOutcome<WorkspaceStatusConfig>> {
        let result = sqlx::query(
            "INSERT INTO motion_workspace
             (motion_workspace_id, default_status, resolve_status, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(motion_workspace_id) DO NOTHING",
        )
        .bind(&config.workspace_id)
        .bind(&config.default_status)
        .bind(&config.resolved_status)
        .bind(config.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        let existing = if result.rows_affected() == 0 {
            self.get_workspace_config(&config.workspace_id).await?
        } else {
            None
        };
        outcome(result.rows_affected(), existing)
    }
}
