//! In-memory dataset
//!
//! Holds every entity kind in plain vectors. Serves as the row source for
//! evaluating predicate trees and as the entity source for direct lookups,
//! which is how tests and embedding callers run filters without a database.

use uuid::Uuid;

use crate::builder::EntitySource;
use crate::errors::Result;
use crate::model::{
    Contract, ContractGuarantee, EntityType, FormAttribute, FormDefinition, FormValue, Identity,
    Record, Role, TreeNode, TreeType,
};
use crate::query::RowSource;
use crate::value::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub identities: Vec<Identity>,
    pub contracts: Vec<Contract>,
    pub guarantees: Vec<ContractGuarantee>,
    pub tree_types: Vec<TreeType>,
    pub tree_nodes: Vec<TreeNode>,
    pub roles: Vec<Role>,
    pub form_definitions: Vec<FormDefinition>,
    pub form_attributes: Vec<FormAttribute>,
    pub form_values: Vec<FormValue>,
}

fn erase<R: Record>(rows: &[R]) -> Vec<&dyn Record> {
    rows.iter().map(|r| r as &dyn Record).collect()
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows across all entity types
    pub fn len(&self) -> usize {
        EntityType::ALL.iter().map(|t| self.rows(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RowSource for Dataset {
    fn rows(&self, entity_type: EntityType) -> Vec<&dyn Record> {
        match entity_type {
            EntityType::Identity => erase(&self.identities),
            EntityType::Contract => erase(&self.contracts),
            EntityType::ContractGuarantee => erase(&self.guarantees),
            EntityType::TreeNode => erase(&self.tree_nodes),
            EntityType::TreeType => erase(&self.tree_types),
            EntityType::Role => erase(&self.roles),
            EntityType::FormDefinition => erase(&self.form_definitions),
            EntityType::FormAttribute => erase(&self.form_attributes),
            EntityType::FormValue => erase(&self.form_values),
        }
    }
}

impl EntitySource for Dataset {
    fn lookup(&self, entity_type: EntityType, field: &str, values: &[Value]) -> Result<Vec<Uuid>> {
        Ok(self
            .rows(entity_type)
            .into_iter()
            .filter(|row| {
                let actual = row.field(field);
                values
                    .iter()
                    .any(|v| actual.sql_cmp(v) == Some(Ordering::Equal))
            })
            .map(|row| row.id())
            .collect())
    }

    fn all(&self, entity_type: EntityType) -> Result<Vec<Uuid>> {
        Ok(self.rows(entity_type).into_iter().map(|row| row.id()).collect())
    }
}
