//! Motion API request and response envelopes.
//!
//! Domain-facing shapes live in [`crate::domain::models::motion`]; these
//! structs only wrap them for the wire.

use serde::{Deserialize, Serialize};

use crate::domain::models::Workspace;

/// Request body for `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub workspace_id: String,
}

/// Minimal body returned by create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResource {
    pub id: String,
}

/// Response from `GET /workspaces`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspacesResponse {
    pub workspaces: Vec<Workspace>,
}
