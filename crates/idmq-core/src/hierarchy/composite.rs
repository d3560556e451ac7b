use std::sync::Arc;

use super::{GuaranteeStrategy, HierarchyOptions, HierarchyStrategy};
use crate::errors::Result;
use crate::query::{Alias, Operand, Predicate, QueryScope};

/// Guarantees OR a structural strategy, as one relation
///
/// Both branches are evaluated against the same contract alias, so a
/// consumer wraps them in a single EXISTS. The guarantee branch drops out
/// when guarantees are switched off or a tree type is requested.
pub struct CompositeStrategy {
    name: &'static str,
    guarantees: GuaranteeStrategy,
    structural: Arc<dyn HierarchyStrategy>,
}

impl CompositeStrategy {
    pub fn new(name: &'static str, structural: Arc<dyn HierarchyStrategy>) -> Self {
        Self {
            name,
            guarantees: GuaranteeStrategy,
            structural,
        }
    }
}

impl HierarchyStrategy for CompositeStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn configuration_properties(&self) -> &'static [&'static str] {
        self.structural.configuration_properties()
    }

    fn relation(
        &self,
        scope: &mut QueryScope,
        contract: Alias,
        manager: Operand,
        options: &HierarchyOptions,
    ) -> Result<Predicate> {
        let guaranteed = self
            .guarantees
            .relation(scope, contract, manager.clone(), options)?;
        let structural = self.structural.relation(scope, contract, manager, options)?;
        Ok(Predicate::or([guaranteed, structural]))
    }
}
