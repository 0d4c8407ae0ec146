//! randpost CLI - serve and bootstrap the random post API
//!
//! - `serve`: create the schema if needed, then run the HTTP server
//! - `init-db`: only create the database and post table

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "randpost",
    author,
    version,
    about = "HTTP API serving one random post at a time from PostgreSQL",
    long_about = "Serve GET /posts (one random post) and POST /posts (create a post) \
                  over a single PostgreSQL table."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.randpost/config.toml if present)
    #[arg(long, short = 'c', global = true, env = "RANDPOST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database and post table if missing
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config_path).await?,
        Commands::InitDb(args) => commands::run_init_db(args, config_path).await?,
    }

    Ok(())
}
