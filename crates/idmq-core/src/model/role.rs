use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{fields, EntityType};
use super::Record;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    /// Unique business code
    pub code: String,
    pub name: String,
    pub disabled: bool,
}

impl Role {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: Uuid::now_v7(),
            name: code.clone(),
            code,
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl Record for Role {
    fn entity_type(&self) -> EntityType {
        EntityType::Role
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::role::CODE => Value::Text(self.code.clone()),
            fields::role::NAME => Value::Text(self.name.clone()),
            fields::role::DISABLED => Value::Bool(self.disabled),
            _ => Value::Null,
        }
    }
}
