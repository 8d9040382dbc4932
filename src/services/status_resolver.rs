//! Per-workspace status label resolution.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    InsertOutcome, ResolvedStatuses, WorkspaceStatus, WorkspaceStatusConfig,
};
use crate::domain::ports::{MappingStore, MotionApi};

/// Resolves which Motion statuses represent open and closed issues.
///
/// The first resolution for a workspace queries Motion and persists the
/// result; later resolutions read the stored pair and never hit Motion
/// again, even if the workspace's statuses change.
pub struct StatusResolver {
    store: Arc<dyn MappingStore>,
    motion: Arc<dyn MotionApi>,
}

impl StatusResolver {
    pub fn new(store: Arc<dyn MappingStore>, motion: Arc<dyn MotionApi>) -> Self {
        Self { store, motion }
    }

    /// Return the default/resolved label pair for a workspace.
    #[instrument(skip(self))]
    pub async fn resolve_statuses(&self, workspace_id: &str) -> DomainResult<ResolvedStatuses> {
        if let Some(config) = self.store.get_workspace_config(workspace_id).await? {
            return Ok(config.statuses());
        }

        info!("no cached statuses, fetching from Motion");
        let statuses = self.motion.list_workspace_statuses(workspace_id).await?;
        let config = select_statuses(workspace_id, &statuses)?;

        match self.store.insert_workspace_config(&config).await? {
            InsertOutcome::Inserted => {
                info!(
                    default_status = %config.default_status,
                    resolved_status = %config.resolved_status,
                    "cached workspace statuses"
                );
                Ok(config.statuses())
            }
            InsertOutcome::AlreadyExists(existing) => Ok(existing.statuses()),
        }
    }
}

/// Pick the first status flagged default and the first flagged resolved.
pub fn select_statuses(
    workspace_id: &str,
    statuses: &[WorkspaceStatus],
) -> DomainResult<WorkspaceStatusConfig> {
    let default_status = statuses.iter().find(|s| s.is_default_status);
    let resolved_status = statuses.iter().find(|s| s.is_resolved_status);

    match (default_status, resolved_status) {
        (Some(default), Some(resolved)) => Ok(WorkspaceStatusConfig::new(
            workspace_id,
            default.name.clone(),
            resolved.name.clone(),
        )),
        (None, _) => Err(DomainError::StatusResolutionFailed {
            workspace_id: workspace_id.to_string(),
            reason: "no status is marked as default".to_string(),
        }),
        (_, None) => Err(DomainError::StatusResolutionFailed {
            workspace_id: workspace_id.to_string(),
            reason: "no status is marked as resolved".to_string(),
        }),
    }
}
