use std::sync::Arc;

use chrono::NaiveDate;
use idmq_core::model::{
    Contract, ContractGuarantee, EntityType, FormAttribute, FormDefinition, FormValue, Identity,
    TreeNode, TreeType,
};
use idmq_core::query::select;
use idmq_core::{DataFilter, Dataset, FilterRegistry, PropertiesConfiguration, QueryScope};
use idmq_store::repo::{insert_dataset, search_in, PageRequest};
use rusqlite::Connection;
use uuid::Uuid;

#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[allow(dead_code)]
pub fn registry(config: PropertiesConfiguration) -> FilterRegistry {
    FilterRegistry::with_default_builders(Arc::new(config)).unwrap()
}

#[allow(dead_code)]
pub fn registry_with_impl(property: &str, implementation: &str) -> FilterRegistry {
    registry(PropertiesConfiguration::new().with(
        format!("idm.sec.core.filter.identity.{property}.impl"),
        implementation,
    ))
}

/// Migrated in-memory database holding `data`
#[allow(dead_code)]
pub fn database(data: &Dataset) -> Connection {
    let mut conn = idmq_store::db::open_in_memory().unwrap();
    idmq_store::migrations::apply_migrations(&mut conn).unwrap();
    insert_dataset(&mut conn, data).unwrap();
    conn
}

/// Ids selected by the SQL listing, sorted
#[allow(dead_code)]
pub fn listed(conn: &Connection, registry: &FilterRegistry, filter: &DataFilter) -> Vec<Uuid> {
    let scope = QueryScope::at(filter.entity_type(), today());
    let request = PageRequest::new(0, 1000);
    let mut ids = search_in(conn, registry, scope, Some(filter), &request)
        .unwrap()
        .ids;
    ids.sort();
    ids
}

/// Ids selected by the in-memory evaluator, sorted
#[allow(dead_code)]
pub fn evaluated(data: &Dataset, registry: &FilterRegistry, filter: &DataFilter) -> Vec<Uuid> {
    let mut scope = QueryScope::at(filter.entity_type(), today());
    let predicates = registry.to_predicates(&mut scope, Some(filter)).unwrap();
    let mut ids = select(data, scope.root(), &predicates);
    ids.sort();
    ids
}

/// Scenario A (M manages S through the tree) and B (G guarantees S's
/// contract) side by side, plus an EAV parent reference on ORG-CHILD
#[allow(dead_code)]
pub struct Org {
    pub data: Dataset,
    pub tree_type: Uuid,
    pub root_node: Uuid,
    pub child_node: Uuid,
    pub manager: Uuid,
    pub subordinate: Uuid,
    pub guarantor: Uuid,
    pub guaranteed: Uuid,
    pub manager_contract: Uuid,
    pub subordinate_contract: Uuid,
    pub guaranteed_contract: Uuid,
}

#[allow(dead_code)]
pub fn org() -> Org {
    let mut data = Dataset::new();

    let tree_type = TreeType::new("ORGANIZATIONS");
    let root = TreeNode::new("ORG-ROOT", tree_type.id);
    let child = TreeNode::new("ORG-CHILD", tree_type.id).with_parent(root.id);
    let sales = TreeNode::new("SALES", tree_type.id);

    let manager = Identity::new("manager");
    let subordinate = Identity::new("subordinate");
    let guarantor = Identity::new("guarantor");
    let guaranteed = Identity::new("guaranteed");

    let manager_contract = Contract::new(manager.id).at(root.id);
    let subordinate_contract = Contract::new(subordinate.id).at(child.id);
    let guarantor_contract = Contract::new(guarantor.id)
        .at(sales.id)
        .valid_till(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    let guaranteed_contract = Contract::new(guaranteed.id).at(sales.id);
    let guarantee = ContractGuarantee::new(guaranteed_contract.id, guarantor.id);

    let form = FormDefinition::new("default", EntityType::TreeNode).main();
    let attribute = FormAttribute::new(form.id, "parentCode");
    let value = FormValue::new(child.id, attribute.id, "ORG-ROOT");

    let org = Org {
        data: Dataset::new(),
        tree_type: tree_type.id,
        root_node: root.id,
        child_node: child.id,
        manager: manager.id,
        subordinate: subordinate.id,
        guarantor: guarantor.id,
        guaranteed: guaranteed.id,
        manager_contract: manager_contract.id,
        subordinate_contract: subordinate_contract.id,
        guaranteed_contract: guaranteed_contract.id,
    };

    data.tree_types.push(tree_type);
    data.tree_nodes.extend([root, child, sales]);
    data.identities.extend([manager, subordinate, guarantor, guaranteed]);
    data.contracts.extend([
        manager_contract,
        subordinate_contract,
        guarantor_contract,
        guaranteed_contract,
    ]);
    data.guarantees.push(guarantee);
    data.form_definitions.push(form);
    data.form_attributes.push(attribute);
    data.form_values.push(value);

    Org { data, ..org }
}
