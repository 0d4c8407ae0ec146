//! Schema bootstrap command

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use randpost_server::db::bootstrap::{ensure_database, ensure_table};
use randpost_server::db::create_pool;
use randpost_server::StoreConfig;

use crate::config::{DbArgs, FileConfig};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Create the database and post table if they are missing
pub async fn run_init_db(args: InitDbArgs, config_path: Option<&Path>) -> Result<()> {
    let file = FileConfig::load(config_path)?;
    let store_config = args.db.resolve(&file.database)?;

    bootstrap(&store_config).await?;
    println!(
        "Database '{}' and table '{}' are ready",
        store_config.database, store_config.table
    );

    Ok(())
}

/// Shared by `init-db` and `serve`.
pub(crate) async fn bootstrap(config: &StoreConfig) -> Result<()> {
    ensure_database(config)
        .await
        .with_context(|| format!("Failed to ensure database '{}'", config.database))?;

    let pool = create_pool(config)
        .await
        .context("Failed to create database pool")?;

    ensure_table(&pool, config)
        .await
        .with_context(|| format!("Failed to ensure table '{}'", config.table))?;

    pool.close().await;
    Ok(())
}
