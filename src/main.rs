mod bot;
mod config;
mod error;
mod middleware;
mod model;
mod platform;
mod service;
mod util;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    bot::start::{init_bot, start_bot},
    config::{Config, DEFAULT_ENV_PREFIX},
    error::AppError,
};

/// Discord bot managing private static channels.
#[derive(Parser, Debug)]
#[command(name = "staticbot", version, about)]
struct Cli {
    /// JSON configuration file; without it the configuration is read from
    /// environment variables
    config: Option<PathBuf>,

    /// File holding the bot token, used together with a configuration file
    #[arg(long, default_value = "token.txt")]
    token_file: PathBuf,

    /// Prefix of the configuration environment variables
    #[arg(long, env = "STATIC_BOT_ENV_PREFIX", default_value = DEFAULT_ENV_PREFIX)]
    env_prefix: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_telemetry(&cli);

    let config = match &cli.config {
        Some(path) => Config::load(&cli.token_file, path)?,
        None => Config::from_env(&cli.env_prefix)?,
    };
    tracing::info!("Loaded configuration: {:?}", config);

    let client = init_bot(Arc::new(config)).await?;
    if let Err(e) = start_bot(client).await {
        tracing::error!("Discord bot error: {}", e);
        return Err(e);
    }

    Ok(())
}
