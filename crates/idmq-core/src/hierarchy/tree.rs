use super::{HierarchyOptions, HierarchyStrategy};
use crate::errors::Result;
use crate::model::fields::{contract, tree_node};
use crate::model::EntityType;
use crate::query::{Alias, Operand, Predicate, QueryScope};
use crate::validity;

/// Managers sit on the structural parent of the contract's work position
///
/// Only the direct parent is considered. The manager's contract is the
/// relationship contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeStrategy;

impl HierarchyStrategy for TreeStrategy {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn relation(
        &self,
        scope: &mut QueryScope,
        subordinate: Alias,
        manager: Operand,
        options: &HierarchyOptions,
    ) -> Result<Predicate> {
        let nodes = scope.subquery(EntityType::TreeNode);
        let node = nodes.root();
        let manager_contract = scope.alias(EntityType::Contract);

        let mut conditions = vec![
            Predicate::eq(node.id(), subordinate.col(contract::WORK_POSITION)),
            Predicate::eq(manager_contract.col(contract::IDENTITY), manager),
            validity::relationship_contract(manager_contract, options.validity, scope.today()),
        ];
        if let Some(tree_type) = options.tree_type {
            conditions.push(Predicate::eq(node.col(tree_node::TREE_TYPE), tree_type));
        }

        Ok(nodes
            .join(
                manager_contract,
                Predicate::eq(
                    manager_contract.col(contract::WORK_POSITION),
                    node.col(tree_node::PARENT),
                ),
            )
            .and_where(Predicate::and(conditions))
            .exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_shape() {
        let mut scope = QueryScope::at(EntityType::Contract, NaiveDate::MIN);
        let subordinate = scope.root();
        let p = TreeStrategy
            .relation(&mut scope, subordinate, Uuid::nil().into(), &HierarchyOptions::default())
            .unwrap();

        assert_eq!(p.exists_count(), 1);
        assert!(p.references(EntityType::TreeNode));
        assert!(!p.references(EntityType::ContractGuarantee));
        assert!(p.to_string().contains("c2.work_position_id = n1.parent_id"));
    }

    #[test]
    fn test_tree_type_restriction() {
        let mut scope = QueryScope::at(EntityType::Contract, NaiveDate::MIN);
        let subordinate = scope.root();
        let tree_type = Uuid::now_v7();
        let options = HierarchyOptions {
            tree_type: Some(tree_type),
            ..HierarchyOptions::default()
        };
        let p = TreeStrategy
            .relation(&mut scope, subordinate, Uuid::nil().into(), &options)
            .unwrap();

        assert!(p.to_string().contains(&format!("n1.tree_type_id = '{}'", tree_type)));
    }
}
