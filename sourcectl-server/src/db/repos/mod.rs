//! Postgres repository implementations
//!
//! Each repository follows these patterns:
//! - One statement per operation, no transactions
//! - Nested configuration travels as JSONB via `sqlx::types::Json`
//! - Existence is decided by the statement itself (RETURNING / rows
//!   affected / ON CONFLICT), never by check-then-write

pub mod global_selectors;
pub mod sources;

pub use global_selectors::PgGlobalSelectorsRepo;
pub use sources::PgSourceRepo;
