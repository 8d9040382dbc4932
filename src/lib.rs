//! motion-relay - GitHub issues to Motion tasks
//!
//! Receives GitHub `issues` webhooks and mirrors each repository as a Motion
//! project and each issue as a Motion task, keeping the bindings in SQLite.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Mapping records, payload models and ports
//! - **Service Layer** (`services`): Reconciliation, status resolution, event handling
//! - **Adapters** (`adapters`): SQLite store, Motion HTTP client, webhook server
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use motion_relay::adapters::motion::{MotionClient, MotionClientConfig};
//! use motion_relay::adapters::sqlite::{initialize_database, SqliteMappingStore};
//! use motion_relay::services::ReconciliationService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = initialize_database("sqlite:.motion-relay/relay.db", None).await?;
//!     let motion = MotionClient::new(MotionClientConfig::new("mk_..."))?;
//!     let engine = ReconciliationService::new(
//!         Arc::new(SqliteMappingStore::new(pool)),
//!         Arc::new(motion),
//!     );
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, InsertOutcome, Issue, IssueEvent, IssueTaskMapping, RepoProjectMapping, Repository,
    WorkspaceStatusConfig,
};
pub use domain::ports::{MappingStore, MotionApi};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    EventResponse, EventStatus, ReconciliationService, StatusResolver, SyncOutcome,
    WebhookEventHandler,
};
