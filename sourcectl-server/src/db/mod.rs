//! Database layer - connection pool, schema, and stores
//!
//! # Design Principles
//!
//! - Connection pool with an acquire deadline - no Arc<Mutex<Connection>>
//! - Handlers depend on the `SourceStore` / `GlobalSelectorsStore` traits
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Single statement per operation

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::{PgGlobalSelectorsRepo, PgSourceRepo};
pub use store::{DbError, GlobalSelectorsStore, SourceStore};
pub use sqlx::PgPool;
