//! Manager / subordinate resolution
//!
//! A [`HierarchyStrategy`] answers one question: given a subordinate's
//! contract row, is a candidate identity its manager? The consumer builders
//! in [`builders`] place that relation inside a correlated subquery for each
//! filter property, so swapping strategies (by configuration) never touches
//! the consumers.
//!
//! Strategies:
//! - [`GuaranteeStrategy`]: explicit guarantee rows on the contract
//! - [`TreeStrategy`]: the contract's work position has the manager's work
//!   position as its structural parent (one hop)
//! - [`EavStrategy`]: an extended attribute of the work position stores the
//!   business code of the manager's work position
//! - [`CompositeStrategy`]: guarantees OR a structural strategy, in one relation

pub mod builders;
pub mod composite;
pub mod eav;
pub mod guarantee;
pub mod tree;

pub use builders::{
    ContractByManagerFilterBuilder, ManagersByContractFilterBuilder, ManagersFilterBuilder,
    SubordinatesFilterBuilder,
};
pub use composite::CompositeStrategy;
pub use eav::EavStrategy;
pub use guarantee::GuaranteeStrategy;
pub use tree::TreeStrategy;

use uuid::Uuid;

use crate::errors::Result;
use crate::filter::{properties, DataFilter};
use crate::query::{Alias, Operand, Predicate, QueryScope};
use crate::validity::ValidityPolicy;

/// One way of deciding "manager of"
pub trait HierarchyStrategy: Send + Sync {
    /// Prefix of the implementation names of builders using this strategy
    fn name(&self) -> &'static str;

    fn configuration_properties(&self) -> &'static [&'static str] {
        &[]
    }

    /// Predicate true when `manager` manages the owner of `contract`
    ///
    /// `contract` is an alias already bound by the caller; `manager` is an
    /// identity id, either a literal or a column of an outer query.
    ///
    /// # Errors
    ///
    /// Returns configuration errors for unusable strategy settings.
    fn relation(
        &self,
        scope: &mut QueryScope,
        contract: Alias,
        manager: Operand,
        options: &HierarchyOptions,
    ) -> Result<Predicate>;
}

/// Relation options read from a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyOptions {
    /// Restrict structural relations to one tree type; disables guarantees
    pub tree_type: Option<Uuid>,
    pub include_guarantees: bool,
    /// Applied to the contract carrying the relationship
    pub validity: ValidityPolicy,
    /// Restrict the subordinate side to one contract
    pub by_contract: Option<Uuid>,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            tree_type: None,
            include_guarantees: true,
            validity: ValidityPolicy::Any,
            by_contract: None,
        }
    }
}

impl HierarchyOptions {
    /// Options of a "managers of" query
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterValue` for unreadable option values.
    pub fn managers(filter: &DataFilter) -> Result<Self> {
        Self::read(filter, properties::MANAGERS_BY_TREE_TYPE)
    }

    /// Options of a "subordinates of" query
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterValue` for unreadable option values.
    pub fn subordinates(filter: &DataFilter) -> Result<Self> {
        Self::read(filter, properties::SUBORDINATES_BY_TREE_TYPE)
    }

    fn read(filter: &DataFilter, tree_type_property: &str) -> Result<Self> {
        Ok(Self {
            tree_type: filter.get_uuid(tree_type_property)?,
            include_guarantees: filter.get_bool(properties::INCLUDE_GUARANTEES)?.unwrap_or(true),
            validity: ValidityPolicy::from_flag(
                filter.get_bool(properties::VALID_CONTRACT_MANAGERS)?,
            ),
            by_contract: filter.get_uuid(properties::MANAGERS_BY_CONTRACT)?,
        })
    }

    /// Whether the guarantee branch applies
    pub fn guarantees_apply(&self) -> bool {
        self.include_guarantees && self.tree_type.is_none()
    }
}
