//! Filter builders
//!
//! A [`FilterBuilder`] turns one named criterion of a
//! [`DataFilter`](crate::filter::DataFilter) into a predicate against a
//! [`QueryScope`]. Several builders may serve the same [`FilterKey`]; the
//! [`FilterRegistry`](crate::registry::FilterRegistry) picks the effective one.

pub mod lazy;
pub mod simple;

pub use lazy::LazyBuilder;
pub use simple::{
    ExcludedFilterBuilder, FieldFilterBuilder, IdFilterBuilder, ValidityFilterBuilder, ValueKind,
};

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::errors::{FilterError, Result};
use crate::filter::DataFilter;
use crate::model::EntityType;
use crate::query::{Predicate, QueryScope};
use crate::value::Value;

/// Root of every filter configuration key
pub const CONFIGURATION_PREFIX: &str = "idm.sec.core.filter";

/// Suffix of the key selecting an alternate implementation
pub const IMPLEMENTATION_SUFFIX: &str = "impl";

/// Namespace of a builder's own settings: `idm.sec.core.filter.<implementation>`
pub fn builder_namespace(implementation: &str) -> String {
    format!("{}.{}", CONFIGURATION_PREFIX, implementation)
}

/// (entity type, property name) a builder serves
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FilterKey {
    entity_type: EntityType,
    property: String,
}

impl FilterKey {
    pub fn new(entity_type: EntityType, property: impl Into<String>) -> Self {
        Self {
            entity_type,
            property: property.into(),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// `idm.sec.core.filter.<entity-type>.<property>`
    pub fn namespace(&self) -> String {
        format!(
            "{}.{}.{}",
            CONFIGURATION_PREFIX,
            self.entity_type.as_str(),
            self.property
        )
    }

    /// `<namespace>.impl`
    pub fn override_key(&self) -> String {
        format!("{}.{}", self.namespace(), IMPLEMENTATION_SUFFIX)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity_type, self.property)
    }
}

/// Direct access to persisted rows, used by the single-criterion fast path
pub trait EntitySource {
    /// Ids of rows whose `field` equals any of `values`
    ///
    /// # Errors
    ///
    /// Returns `Lookup` if the underlying store fails.
    fn lookup(&self, entity_type: EntityType, field: &str, values: &[Value]) -> Result<Vec<Uuid>>;

    /// Ids of every row of the entity type
    ///
    /// # Errors
    ///
    /// Returns `Lookup` if the underlying store fails.
    fn all(&self, entity_type: EntityType) -> Result<Vec<Uuid>>;
}

/// Turns one filter property into a predicate
pub trait FilterBuilder: Send + Sync {
    fn key(&self) -> &FilterKey;

    /// Property name served
    fn name(&self) -> &str {
        self.key().property()
    }

    /// Stable, unique implementation name used in configuration
    fn implementation(&self) -> &str;

    /// Ascending priority; the lowest order is the default for its key
    fn order(&self) -> i32 {
        0
    }

    /// Names of this builder's own settings under its namespace
    fn configuration_properties(&self) -> &'static [&'static str] {
        &[]
    }

    /// Build the predicate, `None` when the criterion contributes no constraint
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterValue` for unreadable criteria and configuration
    /// errors for unusable builder settings.
    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>>;

    /// Resolve ids directly when this criterion is the only one
    ///
    /// # Errors
    ///
    /// Builders that need a composed query return `UnsupportedOperation`.
    fn find(&self, _filter: &DataFilter, _source: &dyn EntitySource) -> Result<Vec<Uuid>> {
        Err(FilterError::UnsupportedOperation {
            implementation: self.implementation().to_string(),
            property: self.name().to_string(),
        })
    }
}
