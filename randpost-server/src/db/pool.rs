//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and a bounded
//! acquisition wait, built from [`StoreConfig`].

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::StoreConfig;

/// Create a PostgreSQL connection pool and open one connection eagerly.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&store_config).await?;
/// ```
pub async fn create_pool(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    pool_options(config)
        .connect_with(config.connect_options())
        .await
}

/// Create a pool that opens connections on first use.
///
/// Startup does not fail if the store is down; requests do, with 500.
pub fn create_pool_lazy(config: &StoreConfig) -> PgPool {
    pool_options(config).connect_lazy_with(config.connect_options())
}

fn pool_options(config: &StoreConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}
