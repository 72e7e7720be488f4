use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sea_orm::{ConnectOptions, Database};
use tracing_subscriber::prelude::*;

use crate::command::Command;
use crate::config::AppConfig;

mod command;
mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<Vec<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config_files = cli.config.unwrap_or_default();
    config_files.insert(0, "config/config.yml".into());

    let config = AppConfig::from_files(&config_files).context("Failed creating config")?;

    initialize_tracing(&config)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed building runtime")?
        .block_on(async move {
            let mut options = ConnectOptions::new(&config.database_url);
            options.sqlx_logging(false);
            let db = Database::connect(options)
                .await
                .context("Failed connecting to database")?;

            tracing::debug!(command = ?cli.command, "Executing");
            cli.command
                .execute(&db)
                .await
                .context("Migration command failed")
        })
}

fn initialize_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(config.trace_level()))
        .context("Failed to create env filter")?;

    let tracing_layer = tracing_subscriber::registry().with(filter);

    if config.trace_json.unwrap_or_default() {
        tracing_layer
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_layer.with(tracing_subscriber::fmt::layer()).init();
    };

    Ok(())
}
