use std::sync::Arc;

use chrono::NaiveDate;
use idmq_core::model::{
    Contract, ContractGuarantee, EntityType, FormAttribute, FormDefinition, FormValue, Identity,
    TreeNode, TreeType,
};
use idmq_core::query::select;
use idmq_core::{DataFilter, Dataset, FilterRegistry, PropertiesConfiguration, QueryScope};
use uuid::Uuid;

/// Reference date of every fixture
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Registry over the bundled builders with the given settings
#[allow(dead_code)]
pub fn registry(config: PropertiesConfiguration) -> FilterRegistry {
    FilterRegistry::with_default_builders(Arc::new(config)).unwrap()
}

/// Registry with the given override for `identity.<property>`
#[allow(dead_code)]
pub fn registry_with_impl(property: &str, implementation: &str) -> FilterRegistry {
    registry(PropertiesConfiguration::new().with(
        format!("idm.sec.core.filter.identity.{property}.impl"),
        implementation,
    ))
}

/// Evaluate a filter against a dataset, ids sorted
#[allow(dead_code)]
pub fn run(registry: &FilterRegistry, data: &Dataset, filter: &DataFilter) -> Vec<Uuid> {
    let mut scope = QueryScope::at(filter.entity_type(), today());
    let predicates = registry.to_predicates(&mut scope, Some(filter)).unwrap();
    let mut ids = select(data, scope.root(), &predicates);
    ids.sort();
    ids
}

#[allow(dead_code)]
pub fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}

/// Org fixture builder
#[derive(Default)]
pub struct Org {
    pub data: Dataset,
}

#[allow(dead_code)]
impl Org {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree_type(&mut self, code: &str) -> Uuid {
        let tree_type = TreeType::new(code);
        let id = tree_type.id;
        self.data.tree_types.push(tree_type);
        id
    }

    pub fn node(&mut self, code: &str, tree_type: Uuid, parent: Option<Uuid>) -> Uuid {
        let mut node = TreeNode::new(code, tree_type);
        node.parent = parent;
        let id = node.id;
        self.data.tree_nodes.push(node);
        id
    }

    pub fn identity(&mut self, username: &str) -> Uuid {
        let identity = Identity::new(username);
        let id = identity.id;
        self.data.identities.push(identity);
        id
    }

    pub fn contract(&mut self, contract: Contract) -> Uuid {
        let id = contract.id;
        self.data.contracts.push(contract);
        id
    }

    pub fn guarantee(&mut self, contract: Uuid, guarantor: Uuid) -> Uuid {
        let guarantee = ContractGuarantee::new(contract, guarantor);
        let id = guarantee.id;
        self.data.guarantees.push(guarantee);
        id
    }

    /// Form definition for tree nodes with one attribute; returns the attribute id
    pub fn node_attribute(&mut self, definition: &str, main: bool, attribute: &str) -> Uuid {
        let mut form = FormDefinition::new(definition, EntityType::TreeNode);
        form.main = main;
        let attribute = FormAttribute::new(form.id, attribute);
        let id = attribute.id;
        self.data.form_definitions.push(form);
        self.data.form_attributes.push(attribute);
        id
    }

    pub fn attribute_value(&mut self, owner: Uuid, attribute: Uuid, value: &str) {
        self.data.form_values.push(FormValue::new(owner, attribute, value));
    }
}

/// Scenario A: M manages S through the organization tree
///
/// M has a contract at "ORG-ROOT"; S has a contract at "ORG-CHILD", whose
/// structural parent is "ORG-ROOT". No extended attributes.
#[allow(dead_code)]
pub struct ScenarioA {
    pub org: Org,
    pub tree_type: Uuid,
    pub root_node: Uuid,
    pub child_node: Uuid,
    pub manager: Uuid,
    pub subordinate: Uuid,
    pub manager_contract: Uuid,
    pub subordinate_contract: Uuid,
}

#[allow(dead_code)]
pub fn scenario_a() -> ScenarioA {
    scenario_a_with(|c| c)
}

/// Scenario A with the manager's contract adjusted
#[allow(dead_code)]
pub fn scenario_a_with(manager_contract: impl FnOnce(Contract) -> Contract) -> ScenarioA {
    let mut org = Org::new();
    let tree_type = org.tree_type("ORGANIZATIONS");
    let root_node = org.node("ORG-ROOT", tree_type, None);
    let child_node = org.node("ORG-CHILD", tree_type, Some(root_node));
    let manager = org.identity("manager");
    let subordinate = org.identity("subordinate");
    let manager_contract = org.contract(manager_contract(Contract::new(manager).at(root_node)));
    let subordinate_contract = org.contract(Contract::new(subordinate).at(child_node));

    ScenarioA {
        org,
        tree_type,
        root_node,
        child_node,
        manager,
        subordinate,
        manager_contract,
        subordinate_contract,
    }
}

/// Scenario B: G is an explicit guarantee on S's contract, no tree relation
#[allow(dead_code)]
pub struct ScenarioB {
    pub org: Org,
    pub guarantor: Uuid,
    pub subordinate: Uuid,
    pub subordinate_contract: Uuid,
}

#[allow(dead_code)]
pub fn scenario_b() -> ScenarioB {
    scenario_b_with(|c| c)
}

/// Scenario B with the subordinate's contract adjusted
#[allow(dead_code)]
pub fn scenario_b_with(subordinate_contract: impl FnOnce(Contract) -> Contract) -> ScenarioB {
    let mut org = Org::new();
    let tree_type = org.tree_type("ORGANIZATIONS");
    let sales = org.node("SALES", tree_type, None);
    let hr = org.node("HR", tree_type, None);
    let guarantor = org.identity("guarantor");
    let subordinate = org.identity("subordinate");
    org.contract(Contract::new(guarantor).at(hr));
    let subordinate_contract =
        org.contract(subordinate_contract(Contract::new(subordinate).at(sales)));
    org.guarantee(subordinate_contract, guarantor);

    ScenarioB {
        org,
        guarantor,
        subordinate,
        subordinate_contract,
    }
}
