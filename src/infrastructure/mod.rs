//! Infrastructure layer module
//!
//! Cross-cutting concerns that are not adapters for a port:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)

pub mod config;
pub mod logging;
