use anyhow::Context;
use clap::Parser;

use banner_rotator::cli::Cli;
use banner_rotator::config::StaticConfig;
use banner_rotator::interfaces::cli::run_cli_command;
use banner_rotator::system::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => StaticConfig::load_from(path),
        None => StaticConfig::load(),
    }
    .context("failed to load configuration")?;

    let guard = init_logging(&config.logging).context("failed to initialize logging")?;

    if let Err(e) = run_cli_command(cli.command, &config).await {
        eprintln!("{}", e.format_colored());
        // flush buffered log lines before exiting
        drop(guard);
        std::process::exit(1);
    }

    Ok(())
}
