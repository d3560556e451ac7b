//! Persisted business entities the filters are written against
//!
//! The subsystem never mutates these; they exist so predicates can be
//! evaluated against an in-memory dataset and so the relational schema has
//! a single source of column names.

pub mod contract;
pub mod entity;
pub mod form;
pub mod identity;
pub mod role;
pub mod tree;

pub use contract::{Contract, ContractGuarantee, ContractState};
pub use entity::{fields, EntityType};
pub use form::{FormAttribute, FormDefinition, FormValue};
pub use identity::{Identity, IdentityState};
pub use role::Role;
pub use tree::{TreeNode, TreeType};

use crate::value::Value;
use uuid::Uuid;

/// A row that predicates can be evaluated against
pub trait Record {
    fn entity_type(&self) -> EntityType;

    fn id(&self) -> Uuid;

    /// Value of a column; unknown columns read as null
    fn field(&self, name: &str) -> Value;
}
