//! Per-query alias allocation

use chrono::{Local, NaiveDate};

use super::predicate::{Alias, Join, Predicate, Subquery};
use crate::model::EntityType;

/// The query a set of predicates is being built for
///
/// Owns the root alias, hands out fresh aliases for subqueries and joins,
/// and fixes the reference date every validity predicate compares against.
/// One scope per query; scopes are never shared between threads.
#[derive(Debug, Clone)]
pub struct QueryScope {
    root: Alias,
    today: NaiveDate,
    next_index: u32,
}

impl QueryScope {
    /// Scope for a query over `entity_type`, dated today (local time)
    pub fn new(entity_type: EntityType) -> Self {
        Self::at(entity_type, Local::now().date_naive())
    }

    /// Scope with an explicit reference date
    pub fn at(entity_type: EntityType, today: NaiveDate) -> Self {
        Self {
            root: Alias::new(entity_type, 0),
            today,
            next_index: 1,
        }
    }

    pub fn root(&self) -> Alias {
        self.root
    }

    pub fn entity_type(&self) -> EntityType {
        self.root.entity_type()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Allocate a fresh alias
    pub fn alias(&mut self, entity_type: EntityType) -> Alias {
        let alias = Alias::new(entity_type, self.next_index);
        self.next_index += 1;
        alias
    }

    /// Open a nested query rooted at a fresh alias
    pub fn subquery(&mut self, entity_type: EntityType) -> SubqueryBuilder {
        SubqueryBuilder::new(self.alias(entity_type))
    }
}

/// Accumulates joins and conditions of one nested query
#[derive(Debug, Clone)]
pub struct SubqueryBuilder {
    from: Alias,
    joins: Vec<Join>,
    conditions: Vec<Predicate>,
}

impl SubqueryBuilder {
    fn new(from: Alias) -> Self {
        Self {
            from,
            joins: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub fn root(&self) -> Alias {
        self.from
    }

    /// Inner join `alias` on `on`; the condition may reference outer aliases
    pub fn join(mut self, alias: Alias, on: Predicate) -> Self {
        self.joins.push(Join { alias, on });
        self
    }

    pub fn and_where(mut self, condition: Predicate) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn build(self) -> Subquery {
        Subquery {
            from: self.from,
            joins: self.joins,
            filter: Predicate::and(self.conditions),
        }
    }

    pub fn exists(self) -> Predicate {
        Predicate::exists(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields;

    #[test]
    fn test_aliases_are_unique_per_scope() {
        let mut scope = QueryScope::at(EntityType::Identity, NaiveDate::MIN);
        let a = scope.alias(EntityType::Contract);
        let b = scope.alias(EntityType::Contract);

        assert_ne!(a, b);
        assert_ne!(a, scope.root());
        assert_eq!(scope.root().to_string(), "i0");
        assert_eq!(a.to_string(), "c1");
        assert_eq!(b.to_string(), "c2");
    }

    #[test]
    fn test_subquery_builder() {
        let mut scope = QueryScope::at(EntityType::Identity, NaiveDate::MIN);
        let root = scope.root();
        let sub = scope.subquery(EntityType::Contract);
        let c = sub.root();
        let n = scope.alias(EntityType::TreeNode);

        let built = sub
            .join(n, Predicate::eq(n.id(), c.col(fields::contract::WORK_POSITION)))
            .and_where(Predicate::eq(c.col(fields::contract::IDENTITY), root.id()))
            .build();

        assert_eq!(built.from, c);
        assert_eq!(built.joins.len(), 1);
        assert_eq!(
            built.to_string(),
            "FROM contracts c1 JOIN tree_nodes n2 ON n2.id = c1.work_position_id WHERE c1.identity_id = i0.id"
        );
    }

    #[test]
    fn test_empty_subquery_filter_is_true() {
        let mut scope = QueryScope::at(EntityType::Role, NaiveDate::MIN);
        let built = scope.subquery(EntityType::Role).build();
        assert_eq!(built.filter, Predicate::True);
    }
}
