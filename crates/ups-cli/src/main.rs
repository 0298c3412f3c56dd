//! ups-admin - push server administration CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ups_cli::cmd;
use ups_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose only changes the fallback.
    let fallback = if cli.global.verbose {
        "ups_core=debug,ups_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    let json = cli.global.json;
    match cli.command {
        Commands::App { command } => {
            let client = cmd::connect(&cli.global)?;
            cmd::app::run(&client, command, json).await
        }
        Commands::Variant { command } => {
            let client = cmd::connect(&cli.global)?;
            cmd::variant::run(&client, command, json).await
        }
        Commands::Config => cmd::config::show(&cli.global),
    }
}
