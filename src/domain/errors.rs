//! Domain errors for the relay.

use thiserror::Error;

/// Domain-level errors that can occur while syncing an issue.
///
/// Remote "not found" responses are not errors: they are reported through
/// `Option` and [`TaskUpdate::NotFound`](crate::domain::models::TaskUpdate)
/// so the engine can heal stale references.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Remote request failed: {0}")]
    RemoteRequestFailed(String),

    #[error("Unable to resolve statuses for workspace {workspace_id}: {reason}")]
    StatusResolutionFailed { workspace_id: String, reason: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
