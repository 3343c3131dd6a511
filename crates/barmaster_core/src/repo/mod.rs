//! Sheet-style persistence boundary.
//!
//! # Responsibility
//! - Define the row-store contract every service talks to.
//! - Provide in-memory and SQLite-backed implementations.
//! - Keep SQL and cell encoding details out of the services.
//!
//! # Invariants
//! - Row order is insertion order for every table.
//! - Only the fixed column set of each `Table` can be written.

pub mod codec;
pub mod memory_store;
pub mod record_store;
pub mod sqlite_store;
