//! idmq Store - SQLite consumer of filter predicates
//!
//! Provides:
//! - SQLite schema for the identity management entities, with migrations
//! - SQL rendering of predicate trees with positional parameters
//! - Paged, sorted listing of entities selected by a `DataFilter`
//! - An `EntitySource` for the registry's direct lookup fast path

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod sql;

// Re-export key types
pub use errors::Result;
pub use repo::{search, Page, PageRequest, SortOrder, SqliteEntitySource};
