//! Post store gateway
//!
//! Handlers reach PostgreSQL only through [`PostStore`]. The Postgres
//! implementation acquires one pooled connection per call, runs a single
//! parametrized statement, and hands the connection back when the
//! `PoolConnection` guard drops, on every exit path.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};

use crate::config::Identifier;

/// Store failure kinds
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not acquire a store connection: {0}")]
    ConnectionFailure(#[source] sqlx::Error),

    #[error("query failed: {0}")]
    QueryFailure(#[source] sqlx::Error),

    #[error("no rows found")]
    NoRowsFound,

    #[error("store call exceeded {0:?}")]
    Timeout(std::time::Duration),
}

/// Operations the HTTP handlers need from persistence.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Content of one post chosen by the store's random ordering.
    async fn random_content(&self) -> Result<String, StoreError>;

    /// Insert one post; `content` is always a bound parameter.
    async fn insert_post(&self, content: &str) -> Result<(), StoreError>;
}

/// PostgreSQL-backed post store
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
    select_random: String,
    insert: String,
}

impl PgPostStore {
    /// Build the store over an existing pool.
    ///
    /// The table name is a validated [`Identifier`], so splicing it into
    /// the statement text is safe. User input never is.
    pub fn new(pool: PgPool, table: &Identifier) -> Self {
        let table = table.quoted();
        Self {
            pool,
            // Sorts the whole table on every call, O(n log n). Fine for a
            // small table; swap for TABLESAMPLE or an id-range pick if it grows.
            select_random: format!("SELECT content FROM {table} ORDER BY random() LIMIT 1"),
            insert: format!("INSERT INTO {table} (content) VALUES ($1)"),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Acquire a pooled connection, waiting at most the pool's acquire timeout.
    pub async fn connect(&self) -> Result<PoolConnection<Postgres>, StoreError> {
        self.pool.acquire().await.map_err(StoreError::ConnectionFailure)
    }

    /// Fetch the content of one randomly ordered row.
    pub async fn select_random_content(&self, conn: &mut PgConnection) -> Result<String, StoreError> {
        let row: Option<(String,)> = sqlx::query_as(&self.select_random)
            .fetch_optional(conn)
            .await
            .map_err(StoreError::QueryFailure)?;

        row.map(|(content,)| content).ok_or(StoreError::NoRowsFound)
    }

    /// Insert one row with `content` bound as `$1`.
    pub async fn insert_content(&self, conn: &mut PgConnection, content: &str) -> Result<(), StoreError> {
        sqlx::query(&self.insert)
            .bind(content)
            .execute(conn)
            .await
            .map_err(StoreError::QueryFailure)?;

        Ok(())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn random_content(&self) -> Result<String, StoreError> {
        let mut conn = self.connect().await?;
        self.select_random_content(&mut conn).await
    }

    async fn insert_post(&self, content: &str) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        self.insert_content(&mut conn, content).await
    }
}
