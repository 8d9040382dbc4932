//! Implementation of the `motion-relay init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::fs;

use crate::adapters::sqlite::initialize_database;
use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::config::loader::CONFIG_DIR;

/// Template written to `.motion-relay/config.yaml`.
pub const CONFIG_TEMPLATE: &str = r#"# motion-relay configuration
#
# Every value can be overridden with MOTION_RELAY_<SECTION>__<KEY>,
# e.g. MOTION_RELAY_MOTION__API_KEY. Put machine-specific overrides in
# .motion-relay/local.yaml.

server:
  host: 0.0.0.0
  port: 8787

database:
  path: .motion-relay/relay.db
  max_connections: 5

logging:
  level: info
  format: json
  rotation: daily
  # log_dir: .motion-relay/logs

motion:
  api_key: ""
  workspace_id: ""
  base_url: https://api.usemotion.com/v1
  timeout_secs: 30

github:
  # Only deliveries sent by this GitHub login are processed
  allowed_sender: ""
"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config.yaml with the template
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub initialized_path: PathBuf,
    pub config_written: bool,
    pub database_initialized: bool,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nWrote {CONFIG_DIR}/config.yaml"));
        }
        if self.database_initialized {
            lines.push(format!("Database initialized at {CONFIG_DIR}/relay.db"));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let output_data = initialize(&args).await?;
    output(&output_data, json_mode)?;
    Ok(())
}

/// Create the project directory, the config template and the database.
///
/// The database is never removed, even with `--force`: it holds the
/// bindings between GitHub and Motion objects.
pub async fn initialize(args: &InitArgs) -> Result<InitOutput> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let relay_dir = target_path.join(CONFIG_DIR);
    let config_path = relay_dir.join("config.yaml");

    if config_path.exists() && !args.force {
        return Ok(InitOutput {
            success: false,
            message: "Project already initialized. Use --force to rewrite the config template."
                .to_string(),
            initialized_path: target_path,
            config_written: false,
            database_initialized: false,
        });
    }

    fs::create_dir_all(&relay_dir)
        .await
        .with_context(|| format!("Failed to create {}", relay_dir.display()))?;

    fs::write(&config_path, CONFIG_TEMPLATE)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let db_url = format!("sqlite:{}", relay_dir.join("relay.db").display());
    initialize_database(&db_url, None)
        .await
        .context("Failed to initialize database")?;

    Ok(InitOutput {
        success: true,
        message: if args.force {
            "Project reinitialized successfully.".to_string()
        } else {
            "Project initialized successfully.".to_string()
        },
        initialized_path: target_path,
        config_written: true,
        database_initialized: true,
    })
}
