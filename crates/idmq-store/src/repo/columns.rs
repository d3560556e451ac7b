//! Persisted columns per entity type, in insert order

use idmq_core::model::{fields, EntityType};

pub fn columns(entity_type: EntityType) -> &'static [&'static str] {
    use fields::*;
    match entity_type {
        EntityType::Identity => &[ID, identity::USERNAME, identity::DISABLED, identity::STATE],
        EntityType::Contract => &[
            ID,
            contract::IDENTITY,
            contract::WORK_POSITION,
            contract::POSITION,
            contract::VALID_FROM,
            contract::VALID_TILL,
            contract::DISABLED,
            contract::STATE,
            contract::MAIN,
        ],
        EntityType::ContractGuarantee => &[ID, guarantee::CONTRACT, guarantee::GUARANTEE],
        EntityType::TreeNode => &[
            ID,
            tree_node::CODE,
            tree_node::NAME,
            tree_node::PARENT,
            tree_node::TREE_TYPE,
        ],
        EntityType::TreeType => &[ID, tree_type::CODE, tree_type::NAME],
        EntityType::Role => &[ID, role::CODE, role::NAME, role::DISABLED],
        EntityType::FormDefinition => &[
            ID,
            form_definition::CODE,
            form_definition::OWNER_TYPE,
            form_definition::MAIN,
        ],
        EntityType::FormAttribute => &[ID, form_attribute::DEFINITION, form_attribute::CODE],
        EntityType::FormValue => &[
            ID,
            form_value::OWNER,
            form_value::ATTRIBUTE,
            form_value::STRING_VALUE,
        ],
    }
}

/// Whether `field` is a persisted column of the entity type
pub fn is_column(entity_type: EntityType, field: &str) -> bool {
    columns(entity_type).contains(&field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sortable_fields_are_columns() {
        for entity_type in EntityType::ALL {
            for field in entity_type.sortable_fields() {
                assert!(is_column(entity_type, field), "{entity_type}.{field}");
            }
        }
    }

    #[test]
    fn test_id_comes_first() {
        for entity_type in EntityType::ALL {
            assert_eq!(columns(entity_type)[0], fields::ID);
        }
    }
}
