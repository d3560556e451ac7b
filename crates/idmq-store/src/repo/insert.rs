//! Writing records
//!
//! Every entity is written through its [`Record`] view, so the relational
//! columns and the in-memory fields cannot drift apart.

use idmq_core::model::{EntityType, Record};
use idmq_core::query::RowSource;
use idmq_core::Dataset;
use rusqlite::Connection;

use super::columns::columns;
use crate::errors::{from_rusqlite, Result};
use crate::sql::to_sql;

/// Parents before children, so foreign keys hold at every statement
const WRITE_ORDER: [EntityType; 9] = [
    EntityType::Identity,
    EntityType::TreeType,
    EntityType::TreeNode,
    EntityType::Contract,
    EntityType::ContractGuarantee,
    EntityType::Role,
    EntityType::FormDefinition,
    EntityType::FormAttribute,
    EntityType::FormValue,
];

/// Insert one record
pub fn insert_record(conn: &Connection, record: &dyn Record) -> Result<()> {
    let entity_type = record.entity_type();
    let columns = columns(entity_type);
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        entity_type.table(),
        columns.join(", "),
        placeholders
    );
    let values: Vec<_> = columns.iter().map(|c| to_sql(&record.field(c))).collect();

    conn.execute(&sql, rusqlite::params_from_iter(values))
        .map_err(from_rusqlite)?;
    Ok(())
}

/// Insert every record of a dataset in one transaction; returns the row count
///
/// Tree nodes are written in dataset order, so parents must precede their
/// children.
pub fn insert_dataset(conn: &mut Connection, data: &Dataset) -> Result<usize> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let mut count = 0;
    for entity_type in WRITE_ORDER {
        for record in data.rows(entity_type) {
            insert_record(&tx, record)?;
            count += 1;
        }
    }
    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(row_count = count, "dataset inserted");
    Ok(count)
}
