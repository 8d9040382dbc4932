//! Domain models
//!
//! Mapping records, Motion objects, GitHub webhook payloads and configuration.

pub mod config;
pub mod github;
pub mod mapping;
pub mod motion;

pub use config::{
    Config, DatabaseConfig, GitHubConfig, LoggingConfig, MotionConfig, ServerConfig,
};
pub use github::{Issue, IssueEvent, Repository, Sender};
pub use mapping::{
    InsertOutcome, IssueTaskMapping, RepoProjectMapping, ResolvedStatuses, WorkspaceStatusConfig,
};
pub use motion::{RemoteProject, TaskPatch, TaskPayload, TaskUpdate, Workspace, WorkspaceStatus};
