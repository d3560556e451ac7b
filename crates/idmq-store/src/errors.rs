//! Error handling for idmq-store
//!
//! Wraps idmq-core IdmError with store-specific helpers

use idmq_core::errors::{FilterError, IdmError, IdmErrorKind};

/// Result type alias using IdmError
pub type Result<T> = std::result::Result<T, IdmError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> IdmError {
    IdmError::new(IdmErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> IdmError {
    IdmError::new(IdmErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> IdmError {
    IdmError::new(IdmErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Lift a filter composition error, tagging the store operation
pub fn from_filter(op: &str, err: FilterError) -> IdmError {
    IdmError::from(err).with_op(op.to_string())
}

/// Create an invalid paging or sorting error
pub fn invalid_page(entity_type: &str, reason: &str) -> IdmError {
    IdmError::new(IdmErrorKind::InvalidInput)
        .with_op("search")
        .with_entity_type(entity_type.to_string())
        .with_message(reason.to_string())
}

/// Create an error for a stored id that is not a UUID
pub fn corrupt_id(entity_type: &str, raw: &str) -> IdmError {
    IdmError::new(IdmErrorKind::Persistence)
        .with_op("read_id")
        .with_entity_type(entity_type.to_string())
        .with_message(format!("Stored id '{}' is not a UUID", raw))
}
