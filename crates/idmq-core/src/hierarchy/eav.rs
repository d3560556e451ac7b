use std::sync::Arc;

use super::{HierarchyOptions, HierarchyStrategy};
use crate::config::ConfigurationService;
use crate::errors::Result;
use crate::model::fields::{contract, form_attribute, form_definition, form_value, tree_node};
use crate::model::EntityType;
use crate::query::{Alias, Operand, Predicate, QueryScope};
use crate::validity;

/// Setting naming the form definition holding the parent code
pub const FORM_DEFINITION: &str = "formDefinition";
/// Setting naming the attribute holding the parent code
pub const FORM_ATTRIBUTE: &str = "formAttribute";
pub const DEFAULT_FORM_ATTRIBUTE: &str = "parentCode";

/// Managers sit on the node whose code is stored as an extended attribute of
/// the subordinate's work position
///
/// Used when the authoritative hierarchy comes from an external feed as a
/// business key instead of a structural parent. The attribute is looked up
/// in the configured form definition of tree nodes, or in their main
/// definition when none is configured. The manager's contract is the
/// relationship contract.
pub struct EavStrategy {
    config: Arc<dyn ConfigurationService>,
    namespace: String,
}

impl EavStrategy {
    /// Settings are read from `<namespace>.formDefinition` and
    /// `<namespace>.formAttribute`
    pub fn new(config: Arc<dyn ConfigurationService>, namespace: impl Into<String>) -> Self {
        Self {
            config,
            namespace: namespace.into(),
        }
    }

    pub fn form_definition(&self) -> Option<String> {
        self.config
            .get_value(&format!("{}.{}", self.namespace, FORM_DEFINITION))
    }

    pub fn form_attribute(&self) -> String {
        self.config.get_value_or(
            &format!("{}.{}", self.namespace, FORM_ATTRIBUTE),
            DEFAULT_FORM_ATTRIBUTE,
        )
    }
}

impl HierarchyStrategy for EavStrategy {
    fn name(&self) -> &'static str {
        "eav-code"
    }

    fn configuration_properties(&self) -> &'static [&'static str] {
        &[FORM_DEFINITION, FORM_ATTRIBUTE]
    }

    fn relation(
        &self,
        scope: &mut QueryScope,
        subordinate: Alias,
        manager: Operand,
        options: &HierarchyOptions,
    ) -> Result<Predicate> {
        let contracts = scope.subquery(EntityType::Contract);
        let manager_contract = contracts.root();
        let manager_node = scope.alias(EntityType::TreeNode);
        let value = scope.alias(EntityType::FormValue);
        let attribute = scope.alias(EntityType::FormAttribute);
        let definition = scope.alias(EntityType::FormDefinition);

        let definition_code = match self.form_definition() {
            Some(code) => Predicate::eq(definition.col(form_definition::CODE), code),
            None => Predicate::eq(definition.col(form_definition::MAIN), true),
        };

        let mut conditions = vec![
            Predicate::eq(manager_contract.col(contract::IDENTITY), manager),
            validity::relationship_contract(manager_contract, options.validity, scope.today()),
        ];
        if let Some(tree_type) = options.tree_type {
            conditions.push(Predicate::eq(manager_node.col(tree_node::TREE_TYPE), tree_type));
        }

        Ok(contracts
            .join(
                manager_node,
                Predicate::eq(manager_node.id(), manager_contract.col(contract::WORK_POSITION)),
            )
            .join(
                value,
                Predicate::and([
                    Predicate::eq(
                        value.col(form_value::OWNER),
                        subordinate.col(contract::WORK_POSITION),
                    ),
                    Predicate::eq(
                        value.col(form_value::STRING_VALUE),
                        manager_node.col(tree_node::CODE),
                    ),
                ]),
            )
            .join(
                attribute,
                Predicate::and([
                    Predicate::eq(attribute.id(), value.col(form_value::ATTRIBUTE)),
                    Predicate::eq(attribute.col(form_attribute::CODE), self.form_attribute()),
                ]),
            )
            .join(
                definition,
                Predicate::and([
                    Predicate::eq(definition.id(), attribute.col(form_attribute::DEFINITION)),
                    Predicate::eq(
                        definition.col(form_definition::OWNER_TYPE),
                        EntityType::TreeNode.as_str(),
                    ),
                    definition_code,
                ]),
            )
            .and_where(Predicate::and(conditions))
            .exists())
    }
}
