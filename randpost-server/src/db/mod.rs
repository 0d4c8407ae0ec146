//! Database layer - connection pool, post store, and bootstrap
//!
//! # Design Principles
//!
//! - Bounded connection pool with a timed acquire, no per-request connect
//! - One statement per store call, user input always bound
//! - Connections are guards: dropped means returned

pub mod bootstrap;
pub mod pool;
pub mod store;

pub use pool::{create_pool, create_pool_lazy};
pub use store::{PgPostStore, PostStore, StoreError};
