//! Store configuration
//!
//! Connection settings are an explicit value built once at startup and
//! passed to the gateway and bootstrap. Nothing here reads globals.

use std::fmt;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgreSQL caps identifiers at 63 bytes.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a plain SQL identifier: {reason}")]
    InvalidIdentifier {
        field: &'static str,
        reason: &'static str,
    },

    #[error("max_connections must be at least 1")]
    ZeroConnections,

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// A table or database name that is safe to splice into statement text.
///
/// Only `[A-Za-z_][A-Za-z0-9_]*` is accepted, and the name is always
/// emitted double-quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(field: &'static str, s: &str) -> Result<Self, ConfigError> {
        let invalid = |reason| ConfigError::InvalidIdentifier { field, reason };

        let mut chars = s.chars();
        match chars.next() {
            None => return Err(invalid("cannot be empty")),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Err(invalid("must start with a letter or underscore"))
            }
            _ => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("only ASCII letters, digits and underscores are allowed"));
        }
        if s.len() > MAX_IDENTIFIER_LEN {
            return Err(invalid("exceeds 63 bytes"));
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier wrapped in double quotes, ready for statement text.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Connection settings for the post store
#[derive(Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<String>,
    /// Database holding the post table
    pub database: Identifier,
    /// Table holding posts
    pub table: Identifier,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("database", &self.database)
            .field("table", &self.table)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Build a config with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIdentifier`] if `database` or `table`
    /// is not a plain identifier.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: Option<String>,
        database: &str,
        table: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            host: host.into(),
            port,
            username: username.into(),
            password,
            database: Identifier::new("database", database)?,
            table: Identifier::new("table", table)?,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        })
    }

    /// Override pool sizing.
    pub fn with_pool(
        mut self,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        if acquire_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                field: "acquire_timeout",
            });
        }
        self.max_connections = max_connections;
        self.acquire_timeout = acquire_timeout;
        Ok(self)
    }

    /// Connect options for the configured database.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.connect_options_for(self.database.as_str())
    }

    /// Connect options for another database on the same server
    /// (used to reach the `postgres` maintenance database).
    pub fn connect_options_for(&self, database: &str) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(database);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}
