//! dbkit CLI - schema bootstrap and product store on SQLite

mod cli;
mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use dbkit_infra_sqlite::{create_pool, ConnectionSource};
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::AppConfig::load(cli.config.as_deref())?;
    logging::init_logging(config.log_format)?;

    let mut settings = config.pool_settings();
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    debug!(database_url = %settings.database_url, "Configuration loaded");

    if let Commands::Schemas = cli.command {
        commands::list_schemas();
        return Ok(());
    }

    let pool = create_pool(&settings)
        .await
        .with_context(|| format!("Failed to open database {}", settings.database_url))?;
    let source: Arc<dyn ConnectionSource> = Arc::new(pool.clone());

    let outcome = match cli.command {
        Commands::Init { schema, file } => {
            commands::init_schema(source, schema, file.as_deref()).await
        }
        Commands::Product(command) => commands::product(source, command).await,
        Commands::Schemas => Ok(()),
    };

    pool.close().await;
    outcome
}
