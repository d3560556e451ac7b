//! Direct lookups backing the registry's single-criterion fast path

use idmq_core::builder::EntitySource;
use idmq_core::errors::{FilterError, Result};
use idmq_core::model::{fields, EntityType};
use idmq_core::Value;
use rusqlite::Connection;
use uuid::Uuid;

use super::columns::is_column;
use crate::sql::to_sql;

/// [`EntitySource`] over a migrated SQLite connection
pub struct SqliteEntitySource<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteEntitySource<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn ids(
        &self,
        entity_type: EntityType,
        sql: &str,
        params: Vec<rusqlite::types::Value>,
    ) -> Result<Vec<Uuid>> {
        let lookup_error = |reason: String| FilterError::Lookup {
            entity_type: entity_type.to_string(),
            reason,
        };
        let mut stmt = self.conn.prepare(sql).map_err(|e| lookup_error(e.to_string()))?;
        let raw = stmt
            .query_map(rusqlite::params_from_iter(params), |row| row.get::<_, String>(0))
            .map_err(|e| lookup_error(e.to_string()))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| lookup_error(e.to_string()))?;

        raw.iter()
            .map(|id| {
                Uuid::parse_str(id)
                    .map_err(|_| lookup_error(format!("stored id '{}' is not a UUID", id)))
            })
            .collect()
    }
}

impl EntitySource for SqliteEntitySource<'_> {
    fn lookup(&self, entity_type: EntityType, field: &str, values: &[Value]) -> Result<Vec<Uuid>> {
        if !is_column(entity_type, field) {
            return Err(FilterError::Lookup {
                entity_type: entity_type.to_string(),
                reason: format!("unknown column '{}'", field),
            });
        }
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        let sql = format!(
            "SELECT {id} FROM {table} WHERE {field} IN ({placeholders}) ORDER BY {id}",
            id = fields::ID,
            table = entity_type.table(),
        );
        self.ids(entity_type, &sql, values.iter().map(to_sql).collect())
    }

    fn all(&self, entity_type: EntityType) -> Result<Vec<Uuid>> {
        let sql = format!(
            "SELECT {id} FROM {table} ORDER BY {id}",
            id = fields::ID,
            table = entity_type.table(),
        );
        self.ids(entity_type, &sql, Vec::new())
    }
}
