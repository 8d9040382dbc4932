//! Implementation of the `motion-relay serve` command.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::adapters::http::{shutdown_signal, WebhookServer, WebhookServerConfig};
use crate::adapters::motion::{MotionClient, MotionClientConfig};
use crate::adapters::sqlite::{initialize_database, PoolConfig, SqliteMappingStore};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl, SecretScrubber};
use crate::services::{ReconciliationService, WebhookEventHandler};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Config file to use instead of .motion-relay/config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, serde::Serialize)]
pub struct ServeOutput {
    pub address: String,
    pub message: String,
}

impl CommandOutput for ServeOutput {
    fn to_human(&self) -> String {
        format!("{} ({})", self.message, self.address)
    }
}

pub async fn execute(args: ServeArgs, json_mode: bool) -> Result<()> {
    let config = match args.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))
        .context("Failed to initialize logging")?;

    let server = build_server(&config).await?;
    let address = format!("{}:{}", config.server.host, config.server.port);

    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("Webhook server failed: {e}"))?;

    info!("webhook server stopped");
    output(
        &ServeOutput {
            address,
            message: "Webhook server stopped".to_string(),
        },
        json_mode,
    )
}

/// Wire the store, Motion client, engine and handler into a server.
pub async fn build_server(config: &Config) -> Result<WebhookServer> {
    let pool_config = PoolConfig {
        max_connections: config.database.max_connections,
        ..PoolConfig::default()
    };
    let pool = initialize_database(&config.database.url(), Some(pool_config))
        .await
        .context("Failed to initialize database")?;

    let motion = MotionClient::new(MotionClientConfig::from(&config.motion))
        .context("Failed to build Motion client")?;

    let engine = Arc::new(ReconciliationService::new(
        Arc::new(SqliteMappingStore::new(pool)),
        Arc::new(motion),
    ));

    let scrubber = SecretScrubber::new().with_secret(config.motion.api_key.clone());
    let handler = Arc::new(WebhookEventHandler::new(
        engine,
        config.github.allowed_sender.clone(),
        config.motion.workspace_id.clone(),
        scrubber,
    ));

    info!(
        workspace_id = %config.motion.workspace_id,
        allowed_sender = %config.github.allowed_sender,
        database = %config.database.path,
        "relay configured"
    );

    Ok(WebhookServer::new(
        handler,
        WebhookServerConfig::from(&config.server),
    ))
}
