//! GitHub webhook HTTP server.
//!
//! Receives webhook deliveries and hands them to the
//! [`WebhookEventHandler`]. The handler decides the outcome; this module maps
//! it onto HTTP.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::models::ServerConfig;
use crate::services::WebhookEventHandler;

/// Header carrying the GitHub event type.
pub const EVENT_HEADER: &str = "x-github-event";

/// Header carrying the GitHub delivery id.
pub const DELIVERY_HEADER: &str = "x-github-delivery";

const INVALID_REQUEST: &str = "Invalid request";

/// Configuration for the webhook server.
#[derive(Debug, Clone)]
pub struct WebhookServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for WebhookServerConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for WebhookServerConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
        }
    }
}

/// Webhook server.
pub struct WebhookServer {
    config: WebhookServerConfig,
    handler: Arc<WebhookEventHandler>,
}

impl WebhookServer {
    pub fn new(handler: Arc<WebhookEventHandler>, config: WebhookServerConfig) -> Self {
        Self { config, handler }
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", post(receive_delivery).fallback(invalid_request))
            .route("/webhook", post(receive_delivery).fallback(invalid_request))
            .route("/health", get(health_check))
            .with_state(Arc::clone(&self.handler))
            .layer(TraceLayer::new_for_http())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.build_router();

        info!("Webhook server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// Resolves when the process receives Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn invalid_request() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, INVALID_REQUEST)
}

async fn receive_delivery(
    State(handler): State<Arc<WebhookEventHandler>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let event_type = header_str(&headers, EVENT_HEADER).unwrap_or_default().to_string();
    let delivery_id = header_str(&headers, DELIVERY_HEADER)
        .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string);

    let span = info_span!("webhook_delivery", %delivery_id, event = %event_type);

    async move {
        let payload: Value = match serde_json::from_slice(&body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "delivery body is not valid JSON");
                return (StatusCode::BAD_REQUEST, INVALID_REQUEST.to_string());
            }
        };

        let response = handler.handle(&event_type, &payload).await;
        let status = StatusCode::from_u16(response.status.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, response.message)
    }
    .instrument(span)
    .await
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
