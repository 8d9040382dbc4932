//! motion-relay CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use motion_relay::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // `serve` installs its own subscriber from the loaded config
    if !matches!(cli.command, Commands::Serve(_)) {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let result = match cli.command {
        Commands::Serve(args) => motion_relay::cli::commands::serve::execute(args, cli.json).await,
        Commands::Init(args) => motion_relay::cli::commands::init::execute(args, cli.json).await,
        Commands::Workspaces(args) => {
            motion_relay::cli::commands::workspaces::execute(args, cli.json).await
        }
    };

    if let Err(err) = result {
        motion_relay::cli::handle_error(err, cli.json);
    }
}
