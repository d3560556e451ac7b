//! Structured logging for filter resolution
//!
//! `init(profile)` installs the process-wide subscriber once. The registry
//! and the store report their operations through `log_op_start!`,
//! `log_op_end!` and `log_op_error!`; resolution details (effective builder,
//! configuration overrides) are logged at `debug` and `info`. Tests install
//! `init_test_capture()` instead and assert on the recorded events.
//!
//! ```rust
//! use idmq_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
