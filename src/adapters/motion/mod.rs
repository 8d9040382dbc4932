//! Motion REST API adapter.
//!
//! Implements the [`MotionApi`](crate::domain::ports::MotionApi) port over
//! HTTP with `reqwest`.

pub mod client;
pub mod models;

pub use client::{MotionClient, MotionClientConfig};
