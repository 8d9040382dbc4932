//! Domain layer for the GitHub to Motion relay
//!
//! This module contains the mapping records, the Motion and GitHub value
//! types, and the port traits the reconciliation engine is written against.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
