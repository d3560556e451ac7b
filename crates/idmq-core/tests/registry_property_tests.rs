//! Property tests for builder resolution and filter bookkeeping

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use idmq_core::builder::{FilterBuilder, FilterKey};
use idmq_core::errors::Result;
use idmq_core::model::EntityType;
use idmq_core::query::{Predicate, QueryScope};
use idmq_core::{ComponentRegistry, DataFilter, FilterRegistry, PropertiesConfiguration};
use proptest::prelude::*;

struct Ordered {
    key: FilterKey,
    implementation: String,
    order: i32,
}

impl FilterBuilder for Ordered {
    fn key(&self) -> &FilterKey {
        &self.key
    }

    fn implementation(&self) -> &str {
        &self.implementation
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn predicate(
        &self,
        _scope: &mut QueryScope,
        _filter: &DataFilter,
    ) -> Result<Option<Predicate>> {
        Ok(None)
    }
}

fn registry(orders: &[i32], config: PropertiesConfiguration) -> FilterRegistry {
    let builders: Vec<Arc<dyn FilterBuilder>> = orders
        .iter()
        .enumerate()
        .map(|(i, order)| {
            Arc::new(Ordered {
                key: FilterKey::new(EntityType::Role, "code"),
                implementation: format!("builder-{i}"),
                order: *order,
            }) as Arc<dyn FilterBuilder>
        })
        .collect();
    let components = Arc::new(ComponentRegistry::new());
    components.install(builders).unwrap();
    FilterRegistry::new(components, Arc::new(config)).unwrap()
}

fn effective(registry: &FilterRegistry) -> String {
    registry
        .builder(EntityType::Role, "code")
        .unwrap()
        .unwrap()
        .implementation()
        .to_string()
}

proptest! {
    #[test]
    fn prop_default_is_first_lowest_order(orders in prop::collection::vec(-3i32..3, 1..8)) {
        let lowest = orders.iter().min().copied().unwrap();
        let expected = orders.iter().position(|o| *o == lowest).unwrap();

        let registry = registry(&orders, PropertiesConfiguration::new());
        prop_assert_eq!(effective(&registry), format!("builder-{expected}"));
        // resolution is repeatable
        prop_assert_eq!(effective(&registry), format!("builder-{expected}"));
    }

    #[test]
    fn prop_override_wins_over_order(
        orders in prop::collection::vec(-3i32..3, 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let chosen = pick.index(orders.len());
        let config = PropertiesConfiguration::new()
            .with("idm.sec.core.filter.role.code.impl", format!("builder-{chosen}"));

        let registry = registry(&orders, config);
        prop_assert_eq!(effective(&registry), format!("builder-{chosen}"));
    }

    #[test]
    fn prop_filter_keeps_first_insertion_order(
        names in prop::collection::vec("[a-z]{1,4}", 1..10)
    ) {
        let mut filter = DataFilter::new(EntityType::Identity);
        let mut expected: Vec<String> = Vec::new();
        for (i, name) in names.iter().enumerate() {
            filter.add(name.as_str(), i as i64);
            if !expected.contains(name) {
                expected.push(name.clone());
            }
        }

        let keys: Vec<String> = filter.keys().map(str::to_string).collect();
        prop_assert_eq!(&keys, &expected);
        for name in &expected {
            let count = names.iter().filter(|n| *n == name).count();
            prop_assert_eq!(filter.values(name).len(), count);
        }
    }

    #[test]
    fn prop_double_negation_cancels(flag in any::<bool>(), n in 0usize..4) {
        let scope = QueryScope::new(EntityType::Contract);
        let base = Predicate::eq(scope.root().col("disabled"), flag);
        let mut negated = base.clone();
        for _ in 0..(2 * n) {
            negated = Predicate::not(negated);
        }
        prop_assert_eq!(negated, base);
    }
}
