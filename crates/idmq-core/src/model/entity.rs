//! Entity types and their queryable fields

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Persisted entity types a query can target
///
/// `as_str()` is the stable name used in filter keys and configuration;
/// `table()` is the relational table the entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Identity,
    Contract,
    ContractGuarantee,
    TreeNode,
    TreeType,
    Role,
    FormDefinition,
    FormAttribute,
    FormValue,
}

impl EntityType {
    pub const ALL: [EntityType; 9] = [
        EntityType::Identity,
        EntityType::Contract,
        EntityType::ContractGuarantee,
        EntityType::TreeNode,
        EntityType::TreeType,
        EntityType::Role,
        EntityType::FormDefinition,
        EntityType::FormAttribute,
        EntityType::FormValue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Identity => "identity",
            EntityType::Contract => "contract",
            EntityType::ContractGuarantee => "contract-guarantee",
            EntityType::TreeNode => "tree-node",
            EntityType::TreeType => "tree-type",
            EntityType::Role => "role",
            EntityType::FormDefinition => "form-definition",
            EntityType::FormAttribute => "form-attribute",
            EntityType::FormValue => "form-value",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            EntityType::Identity => "identities",
            EntityType::Contract => "contracts",
            EntityType::ContractGuarantee => "contract_guarantees",
            EntityType::TreeNode => "tree_nodes",
            EntityType::TreeType => "tree_types",
            EntityType::Role => "roles",
            EntityType::FormDefinition => "form_definitions",
            EntityType::FormAttribute => "form_attributes",
            EntityType::FormValue => "form_values",
        }
    }

    /// Short prefix for query aliases (`c1`, `n2`, ...)
    pub fn alias_prefix(&self) -> &'static str {
        match self {
            EntityType::Identity => "i",
            EntityType::Contract => "c",
            EntityType::ContractGuarantee => "g",
            EntityType::TreeNode => "n",
            EntityType::TreeType => "tt",
            EntityType::Role => "r",
            EntityType::FormDefinition => "fd",
            EntityType::FormAttribute => "fa",
            EntityType::FormValue => "fv",
        }
    }

    /// Columns a listing may be sorted by
    pub fn sortable_fields(&self) -> &'static [&'static str] {
        match self {
            EntityType::Identity => &[fields::ID, fields::identity::USERNAME],
            EntityType::Contract => &[
                fields::ID,
                fields::contract::VALID_FROM,
                fields::contract::VALID_TILL,
                fields::contract::POSITION,
            ],
            EntityType::TreeNode => &[fields::ID, fields::tree_node::CODE, fields::tree_node::NAME],
            EntityType::TreeType => &[fields::ID, fields::tree_type::CODE],
            EntityType::Role => &[fields::ID, fields::role::CODE, fields::role::NAME],
            EntityType::FormDefinition => &[fields::ID, fields::form_definition::CODE],
            EntityType::FormAttribute => &[fields::ID, fields::form_attribute::CODE],
            EntityType::ContractGuarantee | EntityType::FormValue => &[fields::ID],
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown entity type '{}'", s))
    }
}

/// Column names, shared by the in-memory records and the relational schema
pub mod fields {
    pub const ID: &str = "id";

    pub mod identity {
        pub const USERNAME: &str = "username";
        pub const DISABLED: &str = "disabled";
        pub const STATE: &str = "state";
    }

    pub mod contract {
        pub const IDENTITY: &str = "identity_id";
        pub const WORK_POSITION: &str = "work_position_id";
        pub const POSITION: &str = "position";
        pub const VALID_FROM: &str = "valid_from";
        pub const VALID_TILL: &str = "valid_till";
        pub const DISABLED: &str = "disabled";
        pub const STATE: &str = "state";
        pub const MAIN: &str = "main";
    }

    pub mod guarantee {
        pub const CONTRACT: &str = "contract_id";
        pub const GUARANTEE: &str = "guarantee_id";
    }

    pub mod tree_node {
        pub const CODE: &str = "code";
        pub const NAME: &str = "name";
        pub const PARENT: &str = "parent_id";
        pub const TREE_TYPE: &str = "tree_type_id";
    }

    pub mod tree_type {
        pub const CODE: &str = "code";
        pub const NAME: &str = "name";
    }

    pub mod role {
        pub const CODE: &str = "code";
        pub const NAME: &str = "name";
        pub const DISABLED: &str = "disabled";
    }

    pub mod form_definition {
        pub const CODE: &str = "code";
        pub const OWNER_TYPE: &str = "owner_type";
        pub const MAIN: &str = "main";
    }

    pub mod form_attribute {
        pub const DEFINITION: &str = "definition_id";
        pub const CODE: &str = "code";
    }

    pub mod form_value {
        pub const OWNER: &str = "owner_id";
        pub const ATTRIBUTE: &str = "attribute_id";
        pub const STRING_VALUE: &str = "string_value";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for entity_type in EntityType::ALL {
            assert_eq!(entity_type.as_str().parse::<EntityType>(), Ok(entity_type));
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert!("employee".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_alias_prefixes_unique() {
        let mut prefixes: Vec<_> = EntityType::ALL.iter().map(|t| t.alias_prefix()).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), EntityType::ALL.len());
    }
}
