//! In-memory predicate evaluation
//!
//! Evaluates predicate trees against rows held in memory using SQL
//! three-valued logic: comparisons involving null are unknown (`None`) and a
//! row is selected only when its predicate is definitely true. `EXISTS` is a
//! nested loop over the subquery source and its joins.

use uuid::Uuid;

use super::predicate::{Alias, CompareOp, Operand, Predicate, Subquery};
use crate::model::{EntityType, Record};
use crate::value::Value;
use std::cmp::Ordering;

/// Anything that can list the rows of an entity type
pub trait RowSource {
    fn rows(&self, entity_type: EntityType) -> Vec<&dyn Record>;
}

type Bindings<'a> = Vec<(Alias, &'a dyn Record)>;

/// Ids of the `root` rows satisfying every predicate, in source order
pub fn select(source: &dyn RowSource, root: Alias, predicates: &[Predicate]) -> Vec<Uuid> {
    let filter = Predicate::and(predicates.iter().cloned());
    source
        .rows(root.entity_type())
        .into_iter()
        .filter(|row| {
            let mut bindings: Bindings<'_> = vec![(root, *row)];
            evaluate(source, &mut bindings, &filter) == Some(true)
        })
        .map(|row| row.id())
        .collect()
}

/// Evaluate a predicate with `root` bound to `row`
pub fn matches(
    source: &dyn RowSource,
    root: Alias,
    row: &dyn Record,
    predicate: &Predicate,
) -> bool {
    let mut bindings: Bindings<'_> = vec![(root, row)];
    evaluate(source, &mut bindings, predicate) == Some(true)
}

fn evaluate<'a>(
    source: &'a dyn RowSource,
    bindings: &mut Bindings<'a>,
    predicate: &Predicate,
) -> Option<bool> {
    match predicate {
        Predicate::True => Some(true),
        Predicate::False => Some(false),
        Predicate::Compare { left, op, right } => {
            let left = operand(bindings, left);
            let right = operand(bindings, right);
            left.sql_cmp(&right).map(|ordering| compare(*op, ordering))
        }
        Predicate::IsNull(o) => Some(operand(bindings, o).is_null()),
        Predicate::IsNotNull(o) => Some(!operand(bindings, o).is_null()),
        Predicate::In { operand: o, values } => {
            let value = operand(bindings, o);
            if value.is_null() {
                return None;
            }
            let mut unknown = false;
            for candidate in values {
                match value.sql_cmp(candidate) {
                    Some(Ordering::Equal) => return Some(true),
                    Some(_) => {}
                    None => unknown = true,
                }
            }
            if unknown {
                None
            } else {
                Some(false)
            }
        }
        Predicate::And(members) => {
            let mut result = Some(true);
            for member in members {
                match evaluate(source, bindings, member) {
                    Some(false) => return Some(false),
                    None => result = None,
                    Some(true) => {}
                }
            }
            result
        }
        Predicate::Or(members) => {
            let mut result = Some(false);
            for member in members {
                match evaluate(source, bindings, member) {
                    Some(true) => return Some(true),
                    None => result = None,
                    Some(false) => {}
                }
            }
            result
        }
        Predicate::Not(inner) => evaluate(source, bindings, inner).map(|b| !b),
        Predicate::Exists(sub) => Some(exists(source, bindings, sub)),
    }
}

fn exists<'a>(source: &'a dyn RowSource, bindings: &mut Bindings<'a>, sub: &Subquery) -> bool {
    for row in source.rows(sub.from.entity_type()) {
        bindings.push((sub.from, row));
        let found = join_from(source, bindings, sub, 0);
        bindings.pop();
        if found {
            return true;
        }
    }
    false
}

fn join_from<'a>(
    source: &'a dyn RowSource,
    bindings: &mut Bindings<'a>,
    sub: &Subquery,
    depth: usize,
) -> bool {
    let Some(join) = sub.joins.get(depth) else {
        return evaluate(source, bindings, &sub.filter) == Some(true);
    };
    for row in source.rows(join.alias.entity_type()) {
        bindings.push((join.alias, row));
        let found = evaluate(source, bindings, &join.on) == Some(true)
            && join_from(source, bindings, sub, depth + 1);
        bindings.pop();
        if found {
            return true;
        }
    }
    false
}

fn operand(bindings: &Bindings<'_>, operand: &Operand) -> Value {
    match operand {
        Operand::Value(v) => v.clone(),
        // innermost binding wins; an unbound alias reads as null
        Operand::Column(column) => bindings
            .iter()
            .rev()
            .find(|(alias, _)| *alias == column.alias)
            .map(|(_, row)| row.field(column.field))
            .unwrap_or(Value::Null),
    }
}

fn compare(op: CompareOp, ordering: Ordering) -> bool {
    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Ge => ordering != Ordering::Less,
    }
}
