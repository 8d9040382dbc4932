//! Port trait definitions (Hexagonal Architecture)
//!
//! - MappingStore: persistence of GitHub/Motion bindings
//! - MotionApi: Motion REST operations
//!
//! The reconciliation engine depends only on these traits, so it can run
//! against `SQLite` and HTTP in production and against fakes in tests.

pub mod mapping_store;
pub mod motion_api;

pub use mapping_store::MappingStore;
pub use motion_api::MotionApi;
