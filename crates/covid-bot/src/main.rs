//! Main entry point for the COVID statistics bot.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use covid_bot::{reply_output, Args, CovidBot};
use covid_commands::Command;
use covid_common::{init_logging, LoggingConfig};
use covid_config::ConfigLoader;
use tracing::{error, info};

fn main() -> Result<()> {
    let args = Args::parse();

    // One command per run, nothing to spread across threads
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    runtime.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let mut config = ConfigLoader::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    init_logging(&LoggingConfig::from(&config.logging))
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    info!("Starting COVID statistics bot");

    let bot = CovidBot::new(config)?;
    let command = Command::from(args.command);
    let reply = bot.run(&command).await.map_err(|e| {
        error!("{} failed: {}", command.name(), e);
        e
    })?;

    println!("{}", reply_output(&reply));

    if args.post {
        bot.post(&reply).await?;
    }
    Ok(())
}
