//! randpost-server: random post HTTP API over PostgreSQL
//!
//! Two operations over a single `post` table: fetch the content of one
//! randomly chosen row, and insert a new row.
//!
//! - [`db`]: bounded pool, [`db::PostStore`] gateway, schema bootstrap
//! - [`http`]: axum router, handlers, error-to-status mapping
//! - [`models`]: typed request/response bodies

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use config::{ConfigError, Identifier, StoreConfig};
pub use state::AppState;
