//! Single-column builders
//!
//! Equality, range and flag criteria over one column of the queried entity.
//! Exact-match builders on unique columns (id, username, code) also resolve
//! ids directly through an [`EntitySource`].

use uuid::Uuid;

use super::{EntitySource, FilterBuilder, FilterKey};
use crate::errors::{FilterError, Result};
use crate::filter::DataFilter;
use crate::model::{fields, EntityType};
use crate::query::{CompareOp, Predicate, QueryScope};
use crate::validity;
use crate::value::Value;

/// How a criterion value is read from the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Uuid,
    Text,
    Bool,
    Date,
    /// Text restricted to a fixed, upper-case vocabulary
    Keyword(&'static [&'static str]),
}

impl ValueKind {
    fn read(&self, filter: &DataFilter, property: &str) -> Result<Option<Value>> {
        match self {
            ValueKind::Uuid => Ok(filter.get_uuid(property)?.map(Value::Uuid)),
            ValueKind::Text => Ok(filter.get_text(property)?.map(Value::Text)),
            ValueKind::Bool => Ok(filter.get_bool(property)?.map(Value::Bool)),
            ValueKind::Date => Ok(filter.get_date(property)?.map(Value::Date)),
            ValueKind::Keyword(allowed) => match filter.get_text(property)? {
                None => Ok(None),
                Some(text) => {
                    let keyword = text.trim().to_ascii_uppercase();
                    if allowed.contains(&keyword.as_str()) {
                        Ok(Some(Value::Text(keyword)))
                    } else {
                        Err(FilterError::InvalidFilterValue {
                            property: property.to_string(),
                            expected: format!("one of {}", allowed.join(", ")),
                            found: text,
                        })
                    }
                }
            },
        }
    }
}

/// `<entity-type>-<kebab-property>-filter`
pub(crate) fn default_implementation(entity_type: EntityType, property: &str) -> String {
    let mut kebab = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            kebab.push('-');
            kebab.push(c.to_ascii_lowercase());
        } else {
            kebab.push(c);
        }
    }
    format!("{}-{}-filter", entity_type.as_str(), kebab)
}

/// Compares one column of the root entity with the criterion value
pub struct FieldFilterBuilder {
    key: FilterKey,
    implementation: String,
    field: &'static str,
    kind: ValueKind,
    op: CompareOp,
    fast_path: bool,
}

impl FieldFilterBuilder {
    fn with_op(
        entity_type: EntityType,
        property: &str,
        field: &'static str,
        kind: ValueKind,
        op: CompareOp,
    ) -> Self {
        Self {
            key: FilterKey::new(entity_type, property),
            implementation: default_implementation(entity_type, property),
            field,
            kind,
            op,
            fast_path: false,
        }
    }

    /// `field = value`
    pub fn equals(
        entity_type: EntityType,
        property: &str,
        field: &'static str,
        kind: ValueKind,
    ) -> Self {
        Self::with_op(entity_type, property, field, kind, CompareOp::Eq)
    }

    /// `field >= value`
    pub fn at_least(
        entity_type: EntityType,
        property: &str,
        field: &'static str,
        kind: ValueKind,
    ) -> Self {
        Self::with_op(entity_type, property, field, kind, CompareOp::Ge)
    }

    /// `field <= value`
    pub fn at_most(
        entity_type: EntityType,
        property: &str,
        field: &'static str,
        kind: ValueKind,
    ) -> Self {
        Self::with_op(entity_type, property, field, kind, CompareOp::Le)
    }

    /// Enable direct lookups; only meaningful for equality
    pub fn with_fast_path(mut self) -> Self {
        self.fast_path = self.op == CompareOp::Eq;
        self
    }

    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = implementation.into();
        self
    }
}

impl FilterBuilder for FieldFilterBuilder {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>> {
        let Some(value) = self.kind.read(filter, self.name())? else {
            return Ok(None);
        };
        Ok(Some(Predicate::compare(scope.root().col(self.field), self.op, value)))
    }

    fn find(&self, filter: &DataFilter, source: &dyn EntitySource) -> Result<Vec<Uuid>> {
        if !self.fast_path {
            return Err(FilterError::UnsupportedOperation {
                implementation: self.implementation.clone(),
                property: self.name().to_string(),
            });
        }
        let entity_type = self.key.entity_type();
        match self.kind.read(filter, self.name())? {
            None => source.all(entity_type),
            Some(value) => source.lookup(entity_type, self.field, &[value]),
        }
    }
}

/// `id` equality or membership for any entity type
pub struct IdFilterBuilder {
    key: FilterKey,
    implementation: String,
}

impl IdFilterBuilder {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            key: FilterKey::new(entity_type, fields::ID),
            implementation: default_implementation(entity_type, fields::ID),
        }
    }
}

impl FilterBuilder for IdFilterBuilder {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>> {
        let mut ids = filter.get_uuids(self.name())?;
        let column = scope.root().id();
        Ok(match ids.len() {
            0 => None,
            1 => Some(Predicate::eq(column, ids.remove(0))),
            _ => Some(Predicate::in_list(
                column,
                ids.into_iter().map(Value::Uuid).collect(),
            )),
        })
    }

    fn find(&self, filter: &DataFilter, source: &dyn EntitySource) -> Result<Vec<Uuid>> {
        let ids = filter.get_uuids(self.name())?;
        if ids.is_empty() {
            return source.all(self.key.entity_type());
        }
        let values: Vec<Value> = ids.into_iter().map(Value::Uuid).collect();
        source.lookup(self.key.entity_type(), fields::ID, &values)
    }
}

/// Tri-state contract validity: `true` valid, `false` not valid, absent no constraint
pub struct ValidityFilterBuilder {
    key: FilterKey,
    implementation: String,
    strict: bool,
}

impl ValidityFilterBuilder {
    /// Valid today: started and not ended
    pub fn valid_now(property: &str) -> Self {
        Self::new(property, true)
    }

    /// Not ended yet
    pub fn valid_now_or_in_future(property: &str) -> Self {
        Self::new(property, false)
    }

    fn new(property: &str, strict: bool) -> Self {
        Self {
            key: FilterKey::new(EntityType::Contract, property),
            implementation: default_implementation(EntityType::Contract, property),
            strict,
        }
    }
}

impl FilterBuilder for ValidityFilterBuilder {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>> {
        let Some(flag) = filter.get_bool(self.name())? else {
            return Ok(None);
        };
        let valid = if self.strict {
            validity::valid_now(scope.root(), scope.today())
        } else {
            validity::valid_now_or_in_future(scope.root(), scope.today())
        };
        Ok(Some(if flag { valid } else { Predicate::not(valid) }))
    }
}

/// Contract in the EXCLUDED state (`true`) or not (`false`, null-safe)
pub struct ExcludedFilterBuilder {
    key: FilterKey,
    implementation: String,
}

impl ExcludedFilterBuilder {
    pub fn new(property: &str) -> Self {
        Self {
            key: FilterKey::new(EntityType::Contract, property),
            implementation: default_implementation(EntityType::Contract, property),
        }
    }
}

impl FilterBuilder for ExcludedFilterBuilder {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>> {
        Ok(filter
            .get_bool(self.name())?
            .map(|flag| validity::excluded(scope.root(), flag)))
    }
}
