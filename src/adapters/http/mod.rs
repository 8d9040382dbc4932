//! HTTP ingress for GitHub webhook deliveries.

pub mod webhook_server;

pub use webhook_server::{shutdown_signal, WebhookServer, WebhookServerConfig};
