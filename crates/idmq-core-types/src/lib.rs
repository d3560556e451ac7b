//! Core types shared across idmq facilities
//!
//! This crate provides the canonical vocabulary used by both the error
//! and the logging facilities:
//!
//! - **Schema constants**: canonical structured-logging field keys and event names

pub mod schema;
