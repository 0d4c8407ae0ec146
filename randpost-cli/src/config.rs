//! Configuration loading for the randpost CLI
//!
//! Each setting is resolved in order: command-line flag, environment
//! variable (clap `env`, `.env` loaded by dotenvy), `~/.randpost/config.toml`
//! or the file given with `--config`, then the built-in default.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use randpost_server::config::{DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
use randpost_server::http::ServerConfig;
use randpost_server::StoreConfig;

const DEFAULT_DB_HOST: &str = "127.0.0.1";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_NAME: &str = "random_posts";
const DEFAULT_DB_TABLE: &str = "post";

/// Contents of config.toml; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub table: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub cors_permissive: Option<bool>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Default config path: ~/.randpost/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".randpost/config.toml")
    }

    /// Load an explicit path (must exist), or the default path if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// Database flags shared by `serve` and `init-db`
#[derive(Args, Debug, Clone, Default)]
pub struct DbArgs {
    /// PostgreSQL host
    #[arg(long, env = "RANDPOST_DB_HOST")]
    pub db_host: Option<String>,

    /// PostgreSQL port
    #[arg(long, env = "RANDPOST_DB_PORT")]
    pub db_port: Option<u16>,

    /// PostgreSQL user
    #[arg(long, env = "RANDPOST_DB_USER")]
    pub db_user: Option<String>,

    /// PostgreSQL password
    #[arg(long, env = "RANDPOST_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database holding the post table
    #[arg(long, env = "RANDPOST_DB_NAME")]
    pub db_name: Option<String>,

    /// Table holding posts
    #[arg(long, env = "RANDPOST_DB_TABLE")]
    pub db_table: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "RANDPOST_DB_MAX_CONNECTIONS")]
    pub db_max_connections: Option<u32>,

    /// Seconds to wait for a pooled connection
    #[arg(long, env = "RANDPOST_DB_ACQUIRE_TIMEOUT_SECS")]
    pub db_acquire_timeout_secs: Option<u64>,
}

impl DbArgs {
    /// Merge flags over the file section and build a validated store config.
    pub fn resolve(&self, file: &DatabaseSection) -> Result<StoreConfig> {
        let host = pick(&self.db_host, &file.host).unwrap_or_else(|| DEFAULT_DB_HOST.into());
        let port = self.db_port.or(file.port).unwrap_or(DEFAULT_DB_PORT);
        let user = pick(&self.db_user, &file.user).unwrap_or_else(|| DEFAULT_DB_USER.into());
        let password = pick(&self.db_password, &file.password);
        let name = pick(&self.db_name, &file.name).unwrap_or_else(|| DEFAULT_DB_NAME.into());
        let table = pick(&self.db_table, &file.table).unwrap_or_else(|| DEFAULT_DB_TABLE.into());
        let max_connections = self
            .db_max_connections
            .or(file.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let acquire_timeout = self
            .db_acquire_timeout_secs
            .or(file.acquire_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT);

        let config = StoreConfig::new(host, port, user, password, &name, &table)
            .context("Invalid database configuration")?
            .with_pool(max_connections, acquire_timeout)
            .context("Invalid database configuration")?;

        Ok(config)
    }
}

/// HTTP flags for `serve`
#[derive(Args, Debug, Clone, Default)]
pub struct HttpArgs {
    /// Address to bind to (default: 127.0.0.1:8181)
    #[arg(long, short = 'b', env = "RANDPOST_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Seconds a request may spend waiting on the store
    #[arg(long, env = "RANDPOST_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

impl HttpArgs {
    pub fn resolve(&self, file: &ServerSection) -> Result<ServerConfig> {
        let defaults = ServerConfig::default();
        let request_timeout = self
            .request_timeout_secs
            .or(file.request_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        if request_timeout.is_zero() {
            anyhow::bail!("Invalid server configuration: request_timeout must be greater than zero");
        }

        Ok(ServerConfig {
            bind_addr: self.bind.or(file.bind).unwrap_or(defaults.bind_addr),
            cors_permissive: self.cors_permissive || file.cors_permissive.unwrap_or(false),
            request_timeout,
        })
    }
}

fn pick(flag: &Option<String>, file: &Option<String>) -> Option<String> {
    flag.clone().or_else(|| file.clone())
}
