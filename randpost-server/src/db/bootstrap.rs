//! Schema bootstrap
//!
//! Idempotent: safe to run on every start.

use sqlx::{Connection, PgConnection, PgPool};

use crate::config::{Identifier, StoreConfig};

/// Database every PostgreSQL server ships with; used to create ours.
const MAINTENANCE_DATABASE: &str = "postgres";

/// Create the configured database if the server does not have it yet.
pub async fn ensure_database(config: &StoreConfig) -> Result<(), sqlx::Error> {
    let mut conn =
        PgConnection::connect_with(&config.connect_options_for(MAINTENANCE_DATABASE)).await?;

    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(config.database.as_str())
            .fetch_one(&mut conn)
            .await?;

    if exists {
        tracing::debug!(database = %config.database, "database already exists");
    } else {
        tracing::info!(database = %config.database, "creating database");
        sqlx::query(&create_database_statement(&config.database))
            .execute(&mut conn)
            .await?;
    }

    conn.close().await
}

/// CREATE DATABASE takes no bind parameters; the name is a validated identifier.
///
/// template1 may carry a non-UTF8 encoding (SQL_ASCII under a C locale);
/// template0 accepts any encoding.
fn create_database_statement(database: &Identifier) -> String {
    format!(
        "CREATE DATABASE {} ENCODING 'UTF8' TEMPLATE template0",
        database.quoted()
    )
}

/// Create the post table if missing.
pub async fn ensure_table(pool: &PgPool, config: &StoreConfig) -> Result<(), sqlx::Error> {
    tracing::info!(table = %config.table, "ensuring post table");

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            content VARCHAR(255) NOT NULL
        )
        "#,
        config.table.quoted()
    ))
    .execute(pool)
    .await?;

    Ok(())
}
