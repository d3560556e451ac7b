//! Bundled builder set
//!
//! Hierarchy keys get one default composite (order 0) and one alternate per
//! strategy (order 10); the alternates are selected through the key's
//! override setting.

use std::sync::Arc;

use super::ComponentRegistry;
use crate::builder::{
    builder_namespace, ExcludedFilterBuilder, FieldFilterBuilder, FilterBuilder, FilterKey,
    IdFilterBuilder, LazyBuilder, ValidityFilterBuilder, ValueKind,
};
use crate::config::ConfigurationService;
use crate::filter::properties;
use crate::hierarchy::builders::{
    ContractByManagerFilterBuilder, ManagersByContractFilterBuilder, ManagersFilterBuilder,
    SubordinatesFilterBuilder, CONTRACT_BY_MANAGER_FILTER, MANAGERS_BY_CONTRACT_FILTER,
    MANAGERS_FILTER, SUBORDINATES_FILTER,
};
use crate::hierarchy::{
    CompositeStrategy, EavStrategy, GuaranteeStrategy, HierarchyStrategy, TreeStrategy,
};
use crate::model::{fields, EntityType};

/// Order of the default builder of a hierarchy key
pub const DEFAULT_ORDER: i32 = 0;
/// Order of the alternate builders of a hierarchy key
pub const ALTERNATE_ORDER: i32 = 10;

/// Name of the default composite strategy
pub const DEFAULT_STRATEGY: &str = "default";
/// Name of the guarantee + extended attribute composite strategy
pub const EAV_COMPOSITE_STRATEGY: &str = "eav-code-composite";

/// Guarantee-only `managersByContract` builder the default one delegates to
pub const GUARANTEE_MANAGERS_BY_CONTRACT: &str = "guarantee-managers-by-contract-filter";

const IDENTITY_STATES: &[&str] = &[
    "CREATED",
    "VALID",
    "FUTURE_CONTRACT",
    "LEFT",
    "DISABLED",
    "DISABLED_MANUALLY",
];

/// Every bundled builder, in registration order
///
/// `components` is the registry the result will be installed into; builders
/// that delegate to other builders keep a lazy reference to it.
pub fn default_builders(
    components: &Arc<ComponentRegistry>,
    config: &Arc<dyn ConfigurationService>,
) -> Vec<Arc<dyn FilterBuilder>> {
    let mut builders: Vec<Arc<dyn FilterBuilder>> = Vec::new();

    for entity_type in EntityType::ALL {
        builders.push(Arc::new(IdFilterBuilder::new(entity_type)));
    }
    builders.extend(simple_builders());
    builders.extend(hierarchy_builders(components, config));
    builders
}

fn simple_builders() -> Vec<Arc<dyn FilterBuilder>> {
    use fields::{contract, identity, role, tree_node};
    use EntityType::{Contract, Identity, Role, TreeNode};

    vec![
        Arc::new(
            FieldFilterBuilder::equals(
                Identity,
                properties::USERNAME,
                identity::USERNAME,
                ValueKind::Text,
            )
            .with_fast_path(),
        ),
        Arc::new(FieldFilterBuilder::equals(
            Identity,
            properties::DISABLED,
            identity::DISABLED,
            ValueKind::Bool,
        )),
        Arc::new(FieldFilterBuilder::equals(
            Identity,
            properties::STATE,
            identity::STATE,
            ValueKind::Keyword(IDENTITY_STATES),
        )),
        Arc::new(FieldFilterBuilder::equals(
            Contract,
            properties::DISABLED,
            contract::DISABLED,
            ValueKind::Bool,
        )),
        Arc::new(FieldFilterBuilder::equals(
            Contract,
            properties::IDENTITY,
            contract::IDENTITY,
            ValueKind::Uuid,
        )),
        Arc::new(FieldFilterBuilder::equals(
            Contract,
            properties::WORK_POSITION,
            contract::WORK_POSITION,
            ValueKind::Uuid,
        )),
        Arc::new(FieldFilterBuilder::at_least(
            Contract,
            properties::VALID_FROM,
            contract::VALID_FROM,
            ValueKind::Date,
        )),
        Arc::new(FieldFilterBuilder::at_most(
            Contract,
            properties::VALID_TILL,
            contract::VALID_TILL,
            ValueKind::Date,
        )),
        Arc::new(ValidityFilterBuilder::valid_now(properties::VALID)),
        Arc::new(ValidityFilterBuilder::valid_now_or_in_future(
            properties::VALID_NOW_OR_IN_FUTURE,
        )),
        Arc::new(ExcludedFilterBuilder::new(properties::EXCLUDED)),
        Arc::new(
            FieldFilterBuilder::equals(
                TreeNode,
                properties::CODE,
                tree_node::CODE,
                ValueKind::Text,
            )
            .with_fast_path(),
        ),
        Arc::new(FieldFilterBuilder::equals(
            TreeNode,
            properties::PARENT,
            tree_node::PARENT,
            ValueKind::Uuid,
        )),
        Arc::new(FieldFilterBuilder::equals(
            TreeNode,
            properties::TREE_TYPE,
            tree_node::TREE_TYPE,
            ValueKind::Uuid,
        )),
        Arc::new(
            FieldFilterBuilder::equals(
                Role,
                properties::CODE,
                role::CODE,
                ValueKind::Text,
            )
            .with_fast_path(),
        ),
        Arc::new(FieldFilterBuilder::equals(
            Role,
            properties::DISABLED,
            role::DISABLED,
            ValueKind::Bool,
        )),
    ]
}

/// Strategies of one consumer family, default composite first
///
/// Extended attribute strategies read their settings from the namespace of
/// the builder that will use them, so each family gets its own instances.
fn strategies(
    config: &Arc<dyn ConfigurationService>,
    suffix: &str,
    with_composites: bool,
) -> Vec<(Arc<dyn HierarchyStrategy>, i32)> {
    let eav = |prefix: &str| -> Arc<dyn HierarchyStrategy> {
        Arc::new(EavStrategy::new(
            config.clone(),
            builder_namespace(&format!("{}-{}", prefix, suffix)),
        ))
    };

    let mut family: Vec<(Arc<dyn HierarchyStrategy>, i32)> = vec![
        (
            Arc::new(CompositeStrategy::new(DEFAULT_STRATEGY, Arc::new(TreeStrategy))),
            DEFAULT_ORDER,
        ),
        (Arc::new(TreeStrategy), ALTERNATE_ORDER),
        (Arc::new(GuaranteeStrategy), ALTERNATE_ORDER),
        (eav("eav-code"), ALTERNATE_ORDER),
    ];
    if with_composites {
        family.push((
            Arc::new(CompositeStrategy::new(
                EAV_COMPOSITE_STRATEGY,
                eav(EAV_COMPOSITE_STRATEGY),
            )),
            ALTERNATE_ORDER,
        ));
    }
    family
}

fn hierarchy_builders(
    components: &Arc<ComponentRegistry>,
    config: &Arc<dyn ConfigurationService>,
) -> Vec<Arc<dyn FilterBuilder>> {
    let mut builders: Vec<Arc<dyn FilterBuilder>> = Vec::new();

    for (strategy, order) in strategies(config, MANAGERS_FILTER, true) {
        builders.push(Arc::new(ManagersFilterBuilder::new(strategy, order)));
    }
    for (strategy, order) in strategies(config, SUBORDINATES_FILTER, true) {
        builders.push(Arc::new(SubordinatesFilterBuilder::new(strategy, order)));
    }
    for (strategy, order) in strategies(config, CONTRACT_BY_MANAGER_FILTER, false) {
        builders.push(Arc::new(ContractByManagerFilterBuilder::new(strategy, order)));
    }

    let guarantees =
        ManagersByContractFilterBuilder::new(Arc::new(GuaranteeStrategy), ALTERNATE_ORDER);
    let guarantees_key = FilterKey::new(EntityType::Identity, properties::MANAGERS_BY_CONTRACT);
    let lazy_guarantees =
        LazyBuilder::new(components, guarantees_key, GUARANTEE_MANAGERS_BY_CONTRACT);
    builders.push(Arc::new(ManagersByContractFilterBuilder::with_guarantees(
        format!("{}-{}", DEFAULT_STRATEGY, MANAGERS_BY_CONTRACT_FILTER),
        Arc::new(TreeStrategy),
        lazy_guarantees,
    )));
    builders.push(Arc::new(guarantees));

    builders
}
