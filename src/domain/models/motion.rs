//! Motion objects as seen by the relay.
//!
//! Field names follow the Motion REST API (`camelCase` on the wire).

use serde::{Deserialize, Serialize};

/// A project in Motion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub workspace_id: Option<String>,
}

/// Full task payload, used when creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub name: String,
    pub description: String,
    pub status: String,
    pub project_id: String,
    pub workspace_id: String,
}

impl TaskPayload {
    /// The same payload minus `workspaceId`, which Motion rejects on update.
    pub fn without_workspace(&self) -> TaskPatch {
        TaskPatch {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            project_id: self.project_id.clone(),
        }
    }
}

/// Task payload for updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub name: String,
    pub description: String,
    pub status: String,
    pub project_id: String,
}

/// Outcome of updating a task that the relay believes exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskUpdate {
    Updated,
    /// Motion no longer knows the task id; the binding is stale.
    NotFound,
}

/// A status defined in a Motion workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceStatus {
    pub name: String,
    #[serde(default)]
    pub is_default_status: bool,
    #[serde(default)]
    pub is_resolved_status: bool,
}

/// A Motion workspace visible to an API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
}
