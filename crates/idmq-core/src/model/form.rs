//! Extended attributes: schema-less values attached to entities
//!
//! A value is owned by an entity and addressed by the (definition,
//! attribute) pair its attribute belongs to. Each owner type has at most one
//! `main` definition, used when no definition is named explicitly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{fields, EntityType};
use super::Record;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub id: Uuid,
    pub code: String,
    pub owner_type: EntityType,
    pub main: bool,
}

impl FormDefinition {
    pub fn new(code: impl Into<String>, owner_type: EntityType) -> Self {
        Self {
            id: Uuid::now_v7(),
            code: code.into(),
            owner_type,
            main: false,
        }
    }

    pub fn main(mut self) -> Self {
        self.main = true;
        self
    }
}

impl Record for FormDefinition {
    fn entity_type(&self) -> EntityType {
        EntityType::FormDefinition
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::form_definition::CODE => Value::Text(self.code.clone()),
            fields::form_definition::OWNER_TYPE => Value::from(self.owner_type.as_str()),
            fields::form_definition::MAIN => Value::Bool(self.main),
            _ => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormAttribute {
    pub id: Uuid,
    pub definition: Uuid,
    pub code: String,
}

impl FormAttribute {
    pub fn new(definition: Uuid, code: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            definition,
            code: code.into(),
        }
    }
}

impl Record for FormAttribute {
    fn entity_type(&self) -> EntityType {
        EntityType::FormAttribute
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::form_attribute::DEFINITION => Value::Uuid(self.definition),
            fields::form_attribute::CODE => Value::Text(self.code.clone()),
            _ => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormValue {
    pub id: Uuid,
    pub owner: Uuid,
    pub attribute: Uuid,
    pub string_value: Option<String>,
}

impl FormValue {
    pub fn new(owner: Uuid, attribute: Uuid, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner,
            attribute,
            string_value: Some(value.into()),
        }
    }
}

impl Record for FormValue {
    fn entity_type(&self) -> EntityType {
        EntityType::FormValue
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::form_value::OWNER => Value::Uuid(self.owner),
            fields::form_value::ATTRIBUTE => Value::Uuid(self.attribute),
            fields::form_value::STRING_VALUE => self.string_value.clone().into(),
            _ => Value::Null,
        }
    }
}
