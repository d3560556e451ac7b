//! Operation boundary macros
//!
//! Registry and store operations (`to_predicates`, `find`, `search`) emit one
//! `start` event and exactly one of `end` / `end_error`. Each event carries
//! the emitting module as `component`; extra `tracing` fields may follow the
//! fixed ones.

/// Log the start of an operation
///
/// ```
/// # use idmq_core::log_op_start;
/// log_op_start!("to_predicates");
/// log_op_start!("to_predicates", entity_type = "identity", property_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($($field)+)?
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use idmq_core::log_op_end;
/// log_op_end!("find", duration_ms = 3);
/// log_op_end!("to_predicates", duration_ms = 3, predicate_count = 1);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        );
    };
}

/// Log the failed end of an operation
///
/// `$err` is anything convertible into [`IdmError`](crate::errors::IdmError).
/// Besides the stable code, configuration failures report the offending
/// filter property and configuration key as `err_property` and
/// `err_config_key`.
///
/// ```
/// # use idmq_core::{log_op_error, errors::FilterError};
/// let err = FilterError::RegistryNotInstalled;
/// log_op_error!("to_predicates", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let idm_err: $crate::errors::IdmError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?idm_err.kind(),
            err_code = idm_err.code(),
            err_property = idm_err.property(),
            err_config_key = idm_err.config_key(),
            $($($field)+)?
        );
    }};
}
