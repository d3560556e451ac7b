//! Fixture schema migrations
//!
//! The SQL files under `migrations/` are embedded at compile time and applied
//! in id order. Each applied migration is recorded in `schema_version` with
//! the SHA-256 of its SQL; an embedded file that no longer matches its record
//! is an error rather than a silent re-run.

mod embedded;
mod runner;

pub use embedded::{Migration, MIGRATIONS};
pub use runner::{applied_migrations, apply_migrations};
