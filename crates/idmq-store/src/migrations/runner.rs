use rusqlite::{Connection, OptionalExtension};

use super::embedded::{Migration, MIGRATIONS};
use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};

const CREATE_SCHEMA_VERSION: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    migration_id TEXT NOT NULL UNIQUE,
    applied_at INTEGER NOT NULL,
    checksum TEXT
)";

/// Bring the schema up to date; returns how many migrations were applied.
///
/// # Errors
///
/// Fails on SQL errors and when an applied migration's recorded checksum no
/// longer matches the embedded SQL.
pub fn apply_migrations(conn: &mut Connection) -> Result<usize> {
    conn.execute(CREATE_SCHEMA_VERSION, []).map_err(from_rusqlite)?;

    let mut applied = 0;
    for migration in MIGRATIONS {
        if apply(conn, migration)? {
            applied += 1;
        }
    }
    tracing::debug!(applied, total = MIGRATIONS.len(), "schema up to date");
    Ok(applied)
}

/// Ids of the applied migrations, in application order.
///
/// # Errors
///
/// Fails when `schema_version` cannot be read.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT migration_id FROM schema_version ORDER BY id")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?;
    rows.collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)
}

/// Apply `migration` unless already recorded; `true` when it ran
fn apply(conn: &mut Connection, migration: &Migration) -> Result<bool> {
    let checksum = migration.checksum();
    let recorded: Option<Option<String>> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    if let Some(recorded) = recorded {
        return match recorded {
            Some(expected) if expected != checksum => {
                Err(checksum_mismatch(migration.id, &expected, &checksum))
            }
            _ => Ok(false),
        };
    }

    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?, ?, ?)",
        rusqlite::params![migration.id, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(migration_id = migration.id, "migration applied");
    Ok(true)
}
