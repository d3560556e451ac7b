//! idmq Core - dynamic query-predicate composition
//!
//! This crate turns named, typed filter criteria into boolean predicates
//! over identity-management entities, including:
//! - `DataFilter`, the ordered typed property bag of one query
//! - a predicate AST with correlated `EXISTS` subqueries and per-query scopes
//! - pluggable `FilterBuilder`s resolved through a configurable registry
//! - manager / subordinate resolution via guarantee, tree and
//!   extended-attribute strategies
//! - an in-memory evaluator and dataset for running predicates without a store
//!
//! Builders never perform I/O; executing predicates is the caller's concern.

pub mod builder;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod filter;
pub mod hierarchy;
pub mod logging_facility;
pub mod model;
pub mod query;
pub mod registry;
pub mod validity;
pub mod value;

pub use idmq_core_types::schema;

// Re-export commonly used types
pub use builder::{EntitySource, FilterBuilder, FilterKey};
pub use config::{ConfigurationService, PropertiesConfiguration};
pub use dataset::Dataset;
pub use errors::{FilterError, IdmError, IdmErrorKind, Result};
pub use filter::DataFilter;
pub use model::EntityType;
pub use query::{Predicate, QueryScope};
pub use registry::{BuilderDescriptor, ComponentRegistry, FilterRegistry};
pub use validity::ValidityPolicy;
pub use value::Value;
