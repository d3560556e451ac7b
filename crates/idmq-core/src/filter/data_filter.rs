//! DataFilter: the ordered, typed property bag of one query
//!
//! A property that is absent is never seen by any builder. A property that is
//! present with a null value reaches its builder, which decides whether that
//! means "no constraint".

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{FilterError, Result};
use crate::model::EntityType;
use crate::value::Value;

/// Ordered multimap of property name → values, scoped to one entity type
#[derive(Debug, Clone, PartialEq)]
pub struct DataFilter {
    entity_type: EntityType,
    properties: Vec<(String, Vec<Value>)>,
}

impl DataFilter {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            properties: Vec::new(),
        }
    }

    /// Builder-style `put`
    pub fn with(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(property, value);
        self
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Set a property to a single value, replacing any previous values
    ///
    /// A replaced property keeps its original position.
    pub fn put(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        let property = property.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(name, _)| *name == property) {
            Some((_, values)) => *values = vec![value],
            None => self.properties.push((property, vec![value])),
        }
    }

    /// Append a value to a property
    pub fn add(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        let property = property.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(name, _)| *name == property) {
            Some((_, values)) => values.push(value),
            None => self.properties.push((property, vec![value])),
        }
    }

    /// Remove a property, returning its values
    pub fn remove(&mut self, property: &str) -> Option<Vec<Value>> {
        let index = self.properties.iter().position(|(name, _)| name == property)?;
        Some(self.properties.remove(index).1)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.properties.iter().any(|(name, _)| name == property)
    }

    /// Property names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self, property: &str) -> &[Value] {
        self.properties
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// First non-null value of a property
    pub fn first(&self, property: &str) -> Option<&Value> {
        self.values(property).iter().find(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Read a property as a UUID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterValue` if the value is neither a UUID nor UUID text.
    pub fn get_uuid(&self, property: &str) -> Result<Option<Uuid>> {
        self.read(property, "uuid", Value::as_uuid)
    }

    /// Read every value of a property as a UUID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterValue` on the first value that is not a UUID.
    pub fn get_uuids(&self, property: &str) -> Result<Vec<Uuid>> {
        self.values(property)
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| v.as_uuid().ok_or_else(|| invalid(property, "uuid", v)))
            .collect()
    }

    /// Read a property as text; non-text scalars are rendered.
    ///
    /// # Errors
    ///
    /// Never fails today; kept fallible like the other accessors.
    pub fn get_text(&self, property: &str) -> Result<Option<String>> {
        Ok(self.first(property).map(|v| match v {
            Value::Text(s) => s.clone(),
            Value::Uuid(u) => u.to_string(),
            Value::Date(d) => d.format(crate::value::DATE_FORMAT).to_string(),
            other => other.to_string(),
        }))
    }

    /// Read a tri-state boolean: absent or null → `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterValue` if the value is not a boolean.
    pub fn get_bool(&self, property: &str) -> Result<Option<bool>> {
        self.read(property, "boolean", Value::as_bool)
    }

    /// # Errors
    ///
    /// Returns `InvalidFilterValue` if the value is not a date or ISO date text.
    pub fn get_date(&self, property: &str) -> Result<Option<NaiveDate>> {
        self.read(property, "date", Value::as_date)
    }

    /// # Errors
    ///
    /// Returns `InvalidFilterValue` if the value is not an integer.
    pub fn get_int(&self, property: &str) -> Result<Option<i64>> {
        self.read(property, "integer", Value::as_int)
    }

    fn read<T>(
        &self,
        property: &str,
        expected: &str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.first(property) {
            None => Ok(None),
            Some(value) => convert(value)
                .map(Some)
                .ok_or_else(|| invalid(property, expected, value)),
        }
    }

    /// Decode a filter from a JSON object
    ///
    /// Strings, booleans, integers and nulls become single values; arrays of
    /// those become multi-valued properties. Strings stay text and are
    /// coerced by the typed accessors.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterValue` for nested objects, floats or nested
    /// arrays.
    pub fn from_json(entity_type: EntityType, json: &serde_json::Value) -> Result<Self> {
        let object = json.as_object().ok_or_else(|| FilterError::InvalidFilterValue {
            property: "<root>".to_string(),
            expected: "object".to_string(),
            found: json.to_string(),
        })?;

        let mut filter = DataFilter::new(entity_type);
        for (property, raw) in object {
            match raw {
                serde_json::Value::Array(items) => {
                    let mut values = Vec::with_capacity(items.len());
                    for item in items {
                        values.push(json_scalar(property, item)?);
                    }
                    filter.properties.push((property.clone(), values));
                }
                other => {
                    let value = json_scalar(property, other)?;
                    filter.properties.push((property.clone(), vec![value]));
                }
            }
        }
        Ok(filter)
    }
}

fn json_scalar(property: &str, json: &serde_json::Value) -> Result<Value> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        serde_json::Value::Number(n) => n.as_i64().map(Value::Int).ok_or_else(|| {
            FilterError::InvalidFilterValue {
                property: property.to_string(),
                expected: "integer".to_string(),
                found: n.to_string(),
            }
        }),
        other => Err(FilterError::InvalidFilterValue {
            property: property.to_string(),
            expected: "scalar".to_string(),
            found: other.to_string(),
        }),
    }
}

fn invalid(property: &str, expected: &str, found: &Value) -> FilterError {
    FilterError::InvalidFilterValue {
        property: property.to_string(),
        expected: expected.to_string(),
        found: format!("{} {}", found.type_name(), found),
    }
}
