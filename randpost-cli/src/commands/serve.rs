//! HTTP server command
//!
//! Bootstraps the schema, then serves the post API until shutdown.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use randpost_server::db::{create_pool_lazy, PgPostStore};
use randpost_server::http::run_server;

use super::init_db::bootstrap;
use crate::config::{DbArgs, FileConfig, HttpArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub http: HttpArgs,

    #[command(flatten)]
    pub db: DbArgs,

    /// Skip creating the database and table at startup
    #[arg(long)]
    pub skip_bootstrap: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let file = FileConfig::load(config_path)?;
    let store_config = args.db.resolve(&file.database)?;
    let server_config = args.http.resolve(&file.server)?;
    tracing::debug!(?store_config, ?server_config, "resolved configuration");

    if args.skip_bootstrap {
        tracing::info!("Skipping schema bootstrap");
    } else {
        bootstrap(&store_config).await?;
    }

    // Lazy pool: a store outage degrades requests to 500 instead of blocking startup
    let pool = create_pool_lazy(&store_config);
    let store = Arc::new(PgPostStore::new(pool, &store_config.table));

    tracing::info!("Starting randpost server on {}", server_config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(store, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
