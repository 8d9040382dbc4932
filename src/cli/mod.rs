//! Command-line interface.

pub mod commands;
pub mod display;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{init::InitArgs, serve::ServeArgs, workspaces::WorkspacesArgs};

#[derive(Parser, Debug)]
#[command(name = "motion-relay")]
#[command(about = "Relay GitHub issue events into Motion projects and tasks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the webhook server until interrupted
    Serve(ServeArgs),

    /// Create the project directory, config template and database
    Init(InitArgs),

    /// List the Motion workspaces an API key can access
    Workspaces(WorkspacesArgs),
}

/// Print a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
