use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{fields, EntityType};
use super::Record;
use crate::value::Value;

/// Classification of organizational tree nodes (e.g. "ORGANIZATIONS")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeType {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

impl TreeType {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: Uuid::now_v7(),
            name: code.clone(),
            code,
        }
    }
}

impl Record for TreeType {
    fn entity_type(&self) -> EntityType {
        EntityType::TreeType
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::tree_type::CODE => Value::Text(self.code.clone()),
            fields::tree_type::NAME => Value::Text(self.name.clone()),
            _ => Value::Null,
        }
    }
}

/// A node of the organizational hierarchy
///
/// `code` is the business key external systems refer to the node by; the
/// structural parent pointer may or may not be authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub parent: Option<Uuid>,
    pub tree_type: Uuid,
}

impl TreeNode {
    pub fn new(code: impl Into<String>, tree_type: Uuid) -> Self {
        let code = code.into();
        Self {
            id: Uuid::now_v7(),
            name: code.clone(),
            code,
            parent: None,
            tree_type,
        }
    }

    pub fn with_parent(mut self, parent: Uuid) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Record for TreeNode {
    fn entity_type(&self) -> EntityType {
        EntityType::TreeNode
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::tree_node::CODE => Value::Text(self.code.clone()),
            fields::tree_node::NAME => Value::Text(self.name.clone()),
            fields::tree_node::PARENT => self.parent.into(),
            fields::tree_node::TREE_TYPE => Value::Uuid(self.tree_type),
            _ => Value::Null,
        }
    }
}
