use super::{HierarchyOptions, HierarchyStrategy};
use crate::errors::Result;
use crate::model::fields::guarantee;
use crate::model::EntityType;
use crate::query::{Alias, Operand, Predicate, QueryScope};
use crate::validity;

/// Managers are the guarantees recorded on the contract itself
///
/// The contract is the relationship contract: it must be active and satisfy
/// the validity policy. Yields `FALSE` when guarantees are switched off or a
/// tree type restriction is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuaranteeStrategy;

impl HierarchyStrategy for GuaranteeStrategy {
    fn name(&self) -> &'static str {
        "guarantee"
    }

    fn relation(
        &self,
        scope: &mut QueryScope,
        contract: Alias,
        manager: Operand,
        options: &HierarchyOptions,
    ) -> Result<Predicate> {
        if !options.guarantees_apply() {
            return Ok(Predicate::False);
        }
        let guarantees = scope.subquery(EntityType::ContractGuarantee);
        let g = guarantees.root();
        let linked = guarantees
            .and_where(Predicate::eq(g.col(guarantee::CONTRACT), contract.id()))
            .and_where(Predicate::eq(g.col(guarantee::GUARANTEE), manager))
            .exists();

        Ok(Predicate::and([
            validity::relationship_contract(contract, options.validity, scope.today()),
            linked,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn relation(options: &HierarchyOptions) -> Predicate {
        let mut scope = QueryScope::at(EntityType::Contract, NaiveDate::MIN);
        let contract = scope.root();
        GuaranteeStrategy
            .relation(&mut scope, contract, Uuid::nil().into(), options)
            .unwrap()
    }

    #[test]
    fn test_disabled_guarantees_yield_false() {
        let options = HierarchyOptions {
            include_guarantees: false,
            ..HierarchyOptions::default()
        };
        assert_eq!(relation(&options), Predicate::False);
    }

    #[test]
    fn test_tree_type_disables_guarantees() {
        let options = HierarchyOptions {
            tree_type: Some(Uuid::now_v7()),
            ..HierarchyOptions::default()
        };
        assert_eq!(relation(&options), Predicate::False);
    }

    #[test]
    fn test_shape() {
        let p = relation(&HierarchyOptions::default());
        assert_eq!(p.exists_count(), 1);
        assert!(p.references(EntityType::ContractGuarantee));
    }
}
