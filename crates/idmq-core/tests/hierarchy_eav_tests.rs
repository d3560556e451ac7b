#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{registry, registry_with_impl, run, scenario_a, scenario_a_with, scenario_b, today};
use idmq_core::filter::properties;
use idmq_core::model::{ContractState, EntityType};
use idmq_core::{DataFilter, PropertiesConfiguration, QueryScope};
use uuid::Uuid;

const EAV_SUBORDINATES: &str = "eav-code-subordinates-filter";

fn subordinates_of(manager: Uuid) -> DataFilter {
    DataFilter::new(EntityType::Identity).with(properties::SUBORDINATES_FOR, manager)
}

fn eav_config() -> PropertiesConfiguration {
    PropertiesConfiguration::new().with(
        "idm.sec.core.filter.identity.subordinatesFor.impl",
        EAV_SUBORDINATES,
    )
}

#[test]
fn test_no_attribute_no_subordinates() {
    let a = scenario_a();
    let registry = registry_with_impl(properties::SUBORDINATES_FOR, EAV_SUBORDINATES);

    assert!(run(&registry, &a.org.data, &subordinates_of(a.manager)).is_empty());
}

#[test]
fn test_parent_code_in_main_definition() {
    let mut a = scenario_a();
    let attribute = a.org.node_attribute("default", true, "parentCode");
    a.org.attribute_value(a.child_node, attribute, "ORG-ROOT");
    let registry = registry(eav_config());

    assert_eq!(
        run(&registry, &a.org.data, &subordinates_of(a.manager)),
        vec![a.subordinate]
    );
}

#[test]
fn test_encoded_reference_overrides_structure() {
    // the attribute points ORG-ROOT at ORG-CHILD, the reverse of the tree
    let mut a = scenario_a();
    let attribute = a.org.node_attribute("default", true, "parentCode");
    a.org.attribute_value(a.root_node, attribute, "ORG-CHILD");
    let registry = registry(eav_config());

    assert_eq!(
        run(&registry, &a.org.data, &subordinates_of(a.subordinate)),
        vec![a.manager]
    );
    assert!(run(&registry, &a.org.data, &subordinates_of(a.manager)).is_empty());
}

#[test]
fn test_non_main_definition_ignored_without_configuration() {
    let mut a = scenario_a();
    let attribute = a.org.node_attribute("hr-feed", false, "parentCode");
    a.org.attribute_value(a.child_node, attribute, "ORG-ROOT");
    let registry = registry(eav_config());

    assert!(run(&registry, &a.org.data, &subordinates_of(a.manager)).is_empty());
}

#[test]
fn test_configured_definition_and_attribute() {
    let mut a = scenario_a();
    let main = a.org.node_attribute("default", true, "parentCode");
    a.org.attribute_value(a.child_node, main, "ORG-ROOT");
    let feed = a.org.node_attribute("hr-feed", false, "managerCode");
    a.org.attribute_value(a.child_node, feed, "ORG-CHILD");

    let registry = registry(
        eav_config()
            .with("idm.sec.core.filter.eav-code-subordinates-filter.formDefinition", "hr-feed")
            .with("idm.sec.core.filter.eav-code-subordinates-filter.formAttribute", "managerCode"),
    );

    // only the configured pair counts: ORG-CHILD now reports to itself
    assert_eq!(
        run(&registry, &a.org.data, &subordinates_of(a.subordinate)),
        vec![a.subordinate]
    );
    assert!(run(&registry, &a.org.data, &subordinates_of(a.manager)).is_empty());
}

#[test]
fn test_excluded_manager_contract_is_never_a_candidate() {
    let mut a = scenario_a_with(|c| c.with_state(ContractState::Excluded));
    let attribute = a.org.node_attribute("default", true, "parentCode");
    a.org.attribute_value(a.child_node, attribute, "ORG-ROOT");
    let registry = registry(eav_config());

    assert!(run(&registry, &a.org.data, &subordinates_of(a.manager)).is_empty());
}

#[test]
fn test_eav_managers() {
    let mut a = scenario_a();
    let attribute = a.org.node_attribute("default", true, "parentCode");
    a.org.attribute_value(a.child_node, attribute, "ORG-ROOT");
    let registry = registry_with_impl(properties::MANAGERS_FOR, "eav-code-managers-filter");
    let filter = DataFilter::new(EntityType::Identity)
        .with(properties::MANAGERS_FOR, a.subordinate);

    assert_eq!(run(&registry, &a.org.data, &filter), vec![a.manager]);
}

#[test]
fn test_eav_composite_includes_guarantees() {
    let b = scenario_b();
    let registry =
        registry_with_impl(properties::MANAGERS_FOR, "eav-code-composite-managers-filter");
    let filter = DataFilter::new(EntityType::Identity)
        .with(properties::MANAGERS_FOR, b.subordinate);

    assert_eq!(run(&registry, &b.org.data, &filter), vec![b.guarantor]);

    let plain = registry_with_impl(properties::MANAGERS_FOR, "eav-code-managers-filter");
    assert!(run(&plain, &b.org.data, &filter).is_empty());
}

#[test]
fn test_override_changes_predicate_shape_only() {
    let a = scenario_a();
    let filter = subordinates_of(a.manager);
    let predicates = |implementation: &str| {
        let registry = registry_with_impl(properties::SUBORDINATES_FOR, implementation);
        let mut scope = QueryScope::at(EntityType::Identity, today());
        registry.to_predicates(&mut scope, Some(&filter)).unwrap()
    };

    let tree = predicates("tree-subordinates-filter");
    let eav = predicates(EAV_SUBORDINATES);

    assert_eq!(tree.len(), 1);
    assert_eq!(eav.len(), 1);
    assert_ne!(tree, eav);
    assert!(tree[0].references(EntityType::TreeNode));
    assert!(!tree[0].references(EntityType::FormValue));
    assert!(eav[0].references(EntityType::FormValue));
}

#[test]
fn test_contract_by_manager_eav() {
    let mut a = scenario_a();
    let attribute = a.org.node_attribute("default", true, "parentCode");
    a.org.attribute_value(a.child_node, attribute, "ORG-ROOT");
    let registry = registry(PropertiesConfiguration::new().with(
        "idm.sec.core.filter.contract.subordinatesFor.impl",
        "eav-code-contract-by-manager-filter",
    ));
    let filter = DataFilter::new(EntityType::Contract)
        .with(properties::SUBORDINATES_FOR, a.manager);

    assert_eq!(
        run(&registry, &a.org.data, &filter),
        vec![a.subordinate_contract]
    );
}
