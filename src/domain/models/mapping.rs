//! Mapping records between GitHub identifiers and Motion identifiers.
//!
//! A mapping is a cache of the last known binding, not a source of truth:
//! the remote object it points at may have been deleted on the Motion side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binding between a GitHub repository and the Motion project that mirrors it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoProjectMapping {
    /// GitHub repository id (unique key).
    pub repo_id: i64,
    /// Short repository name, also used as the Motion project name.
    pub repo_name: String,
    /// `owner/name` form of the repository.
    pub repo_full_name: String,
    /// Motion project id.
    pub project_id: String,
    /// GitHub login that owns the binding.
    pub owner_user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RepoProjectMapping {
    /// Create a new mapping stamped with the current time.
    pub fn new(
        repo_id: i64,
        repo_name: impl Into<String>,
        repo_full_name: impl Into<String>,
        project_id: impl Into<String>,
        owner_user_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            repo_id,
            repo_name: repo_name.into(),
            repo_full_name: repo_full_name.into(),
            project_id: project_id.into(),
            owner_user_id: owner_user_id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Binding between a GitHub issue and the Motion task that mirrors it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTaskMapping {
    /// GitHub issue id (unique key).
    pub issue_id: i64,
    pub owner_user_id: String,
    /// Motion task id.
    pub task_id: String,
    /// GitHub repository the issue belongs to.
    pub repo_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IssueTaskMapping {
    /// Create a new mapping stamped with the current time.
    pub fn new(
        issue_id: i64,
        owner_user_id: impl Into<String>,
        task_id: impl Into<String>,
        repo_id: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            issue_id,
            owner_user_id: owner_user_id.into(),
            task_id: task_id.into(),
            repo_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Cached pair of Motion status labels for one workspace.
///
/// Written once, the first time the workspace is seen, and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceStatusConfig {
    pub workspace_id: String,
    /// Status assigned to open issues.
    pub default_status: String,
    /// Status assigned to closed issues.
    pub resolved_status: String,
    pub created_at: DateTime<Utc>,
}

impl WorkspaceStatusConfig {
    pub fn new(
        workspace_id: impl Into<String>,
        default_status: impl Into<String>,
        resolved_status: impl Into<String>,
    ) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            default_status: default_status.into(),
            resolved_status: resolved_status.into(),
            created_at: Utc::now(),
        }
    }

    /// The label pair used for status translation.
    pub fn statuses(&self) -> ResolvedStatuses {
        ResolvedStatuses {
            default_status: self.default_status.clone(),
            resolved_status: self.resolved_status.clone(),
        }
    }
}

/// Status labels used to translate GitHub issue state into Motion status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStatuses {
    pub default_status: String,
    pub resolved_status: String,
}

impl ResolvedStatuses {
    /// Pick the Motion status for a GitHub issue state.
    ///
    /// Only `"closed"` maps to the resolved status; every other state,
    /// including unknown ones, maps to the default status.
    pub fn for_issue_state(&self, state: &str) -> &str {
        if state == "closed" {
            &self.resolved_status
        } else {
            &self.default_status
        }
    }
}

/// Result of a conditional insert keyed by a unique column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    /// The row was written.
    Inserted,
    /// Another writer got there first; carries the row that won.
    AlreadyExists(T),
}
