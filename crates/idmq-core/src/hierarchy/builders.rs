//! Builders consuming a hierarchy strategy
//!
//! Each builder opens one correlated subquery over contracts, ties it to the
//! outer query and adds the strategy's relation inside it.

use std::sync::Arc;

use super::{HierarchyOptions, HierarchyStrategy};
use crate::builder::{FilterBuilder, FilterKey, LazyBuilder};
use crate::errors::Result;
use crate::filter::{properties, DataFilter};
use crate::model::fields::contract;
use crate::model::EntityType;
use crate::query::{Predicate, QueryScope};
use crate::validity;

/// Suffix of identity `managersFor` builders
pub const MANAGERS_FILTER: &str = "managers-filter";
/// Suffix of identity `subordinatesFor` builders
pub const SUBORDINATES_FILTER: &str = "subordinates-filter";
/// Suffix of contract `subordinatesFor` builders
pub const CONTRACT_BY_MANAGER_FILTER: &str = "contract-by-manager-filter";
/// Suffix of identity `managersByContract` builders
pub const MANAGERS_BY_CONTRACT_FILTER: &str = "managers-by-contract-filter";

fn implementation_name(strategy: &dyn HierarchyStrategy, suffix: &str) -> String {
    format!("{}-{}", strategy.name(), suffix)
}

/// Identities managing the identity given in `managersFor`
///
/// `managersByContract` narrows the subordinate side to one contract.
pub struct ManagersFilterBuilder {
    key: FilterKey,
    implementation: String,
    order: i32,
    strategy: Arc<dyn HierarchyStrategy>,
}

impl ManagersFilterBuilder {
    pub fn new(strategy: Arc<dyn HierarchyStrategy>, order: i32) -> Self {
        Self {
            key: FilterKey::new(EntityType::Identity, properties::MANAGERS_FOR),
            implementation: implementation_name(strategy.as_ref(), MANAGERS_FILTER),
            order,
            strategy,
        }
    }
}

impl FilterBuilder for ManagersFilterBuilder {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn configuration_properties(&self) -> &'static [&'static str] {
        self.strategy.configuration_properties()
    }

    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>> {
        let Some(subordinate) = filter.get_uuid(properties::MANAGERS_FOR)? else {
            return Ok(None);
        };
        let options = HierarchyOptions::managers(filter)?;
        let root = scope.root();
        let contracts = scope.subquery(EntityType::Contract);
        let sc = contracts.root();

        let mut conditions = vec![
            Predicate::eq(sc.col(contract::IDENTITY), subordinate),
            validity::active_contract(sc),
        ];
        if let Some(by_contract) = options.by_contract {
            conditions.push(Predicate::eq(sc.id(), by_contract));
        }
        conditions.push(self.strategy.relation(scope, sc, root.id(), &options)?);

        Ok(Some(contracts.and_where(Predicate::and(conditions)).exists()))
    }
}

/// Identities managed by the identity given in `subordinatesFor`
pub struct SubordinatesFilterBuilder {
    key: FilterKey,
    implementation: String,
    order: i32,
    strategy: Arc<dyn HierarchyStrategy>,
}

impl SubordinatesFilterBuilder {
    pub fn new(strategy: Arc<dyn HierarchyStrategy>, order: i32) -> Self {
        Self {
            key: FilterKey::new(EntityType::Identity, properties::SUBORDINATES_FOR),
            implementation: implementation_name(strategy.as_ref(), SUBORDINATES_FILTER),
            order,
            strategy,
        }
    }
}

impl FilterBuilder for SubordinatesFilterBuilder {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn configuration_properties(&self) -> &'static [&'static str] {
        self.strategy.configuration_properties()
    }

    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>> {
        let Some(manager) = filter.get_uuid(properties::SUBORDINATES_FOR)? else {
            return Ok(None);
        };
        let options = HierarchyOptions::subordinates(filter)?;
        let root = scope.root();
        let contracts = scope.subquery(EntityType::Contract);
        let sc = contracts.root();

        let relation = self.strategy.relation(scope, sc, manager.into(), &options)?;
        Ok(Some(
            contracts
                .and_where(Predicate::and([
                    Predicate::eq(sc.col(contract::IDENTITY), root.id()),
                    validity::active_contract(sc),
                    relation,
                ]))
                .exists(),
        ))
    }
}

/// Contracts managed by the identity given in `subordinatesFor`
pub struct ContractByManagerFilterBuilder {
    key: FilterKey,
    implementation: String,
    order: i32,
    strategy: Arc<dyn HierarchyStrategy>,
}

impl ContractByManagerFilterBuilder {
    pub fn new(strategy: Arc<dyn HierarchyStrategy>, order: i32) -> Self {
        Self {
            key: FilterKey::new(EntityType::Contract, properties::SUBORDINATES_FOR),
            implementation: implementation_name(strategy.as_ref(), CONTRACT_BY_MANAGER_FILTER),
            order,
            strategy,
        }
    }
}

impl FilterBuilder for ContractByManagerFilterBuilder {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn configuration_properties(&self) -> &'static [&'static str] {
        self.strategy.configuration_properties()
    }

    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>> {
        let Some(manager) = filter.get_uuid(properties::SUBORDINATES_FOR)? else {
            return Ok(None);
        };
        let options = HierarchyOptions::subordinates(filter)?;
        let root = scope.root();
        let relation = self.strategy.relation(scope, root, manager.into(), &options)?;
        Ok(Some(Predicate::and([validity::active_contract(root), relation])))
    }
}

/// Managers of one contract given in `managersByContract`
///
/// Inert when `managersFor` is present, which already narrows by contract.
/// The default variant ORs the structural relation with the guarantee-only
/// variant of the same key, reached through a lazy reference. That builder
/// owns its own contract subquery, so the default predicate holds two EXISTS
/// tests; each of them carries a single relation.
pub struct ManagersByContractFilterBuilder {
    key: FilterKey,
    implementation: String,
    order: i32,
    strategy: Arc<dyn HierarchyStrategy>,
    guarantees: Option<LazyBuilder>,
}

impl ManagersByContractFilterBuilder {
    /// Structural relation plus guarantees from `guarantees`
    pub fn with_guarantees(
        implementation: impl Into<String>,
        strategy: Arc<dyn HierarchyStrategy>,
        guarantees: LazyBuilder,
    ) -> Self {
        Self {
            key: Self::filter_key(),
            implementation: implementation.into(),
            order: 0,
            strategy,
            guarantees: Some(guarantees),
        }
    }

    /// Only the strategy's own relation
    pub fn new(strategy: Arc<dyn HierarchyStrategy>, order: i32) -> Self {
        Self {
            key: Self::filter_key(),
            implementation: implementation_name(strategy.as_ref(), MANAGERS_BY_CONTRACT_FILTER),
            order,
            strategy,
            guarantees: None,
        }
    }

    fn filter_key() -> FilterKey {
        FilterKey::new(EntityType::Identity, properties::MANAGERS_BY_CONTRACT)
    }
}

impl FilterBuilder for ManagersByContractFilterBuilder {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn configuration_properties(&self) -> &'static [&'static str] {
        self.strategy.configuration_properties()
    }

    fn predicate(&self, scope: &mut QueryScope, filter: &DataFilter) -> Result<Option<Predicate>> {
        if filter.contains(properties::MANAGERS_FOR) {
            return Ok(None);
        }
        let Some(contract_id) = filter.get_uuid(properties::MANAGERS_BY_CONTRACT)? else {
            return Ok(None);
        };
        let options = HierarchyOptions::managers(filter)?;
        let root = scope.root();
        let contracts = scope.subquery(EntityType::Contract);
        let sc = contracts.root();
        let relation = self.strategy.relation(scope, sc, root.id(), &options)?;
        let structural = contracts
            .and_where(Predicate::and([
                Predicate::eq(sc.id(), contract_id),
                validity::active_contract(sc),
                relation,
            ]))
            .exists();

        let guaranteed = match &self.guarantees {
            Some(lazy) if options.guarantees_apply() => lazy.get()?.predicate(scope, filter)?,
            _ => None,
        };
        Ok(Some(Predicate::or([structural].into_iter().chain(guaranteed))))
    }
}
