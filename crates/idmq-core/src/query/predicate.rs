//! Predicate trees
//!
//! A predicate is a boolean condition over aliased columns. Correlated
//! subqueries appear as [`Predicate::Exists`]; their joins and filters may
//! reference any alias of an enclosing query.

use std::fmt;

use crate::model::{fields, EntityType};
use crate::value::Value;

/// A query source alias (`i0`, `c1`, ...) allocated by a
/// [`QueryScope`](super::QueryScope)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alias {
    entity_type: EntityType,
    index: u32,
}

impl Alias {
    pub(crate) fn new(entity_type: EntityType, index: u32) -> Self {
        Self { entity_type, index }
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn col(&self, field: &'static str) -> Operand {
        Operand::Column(Column {
            alias: *self,
            field,
        })
    }

    pub fn id(&self) -> Operand {
        self.col(fields::ID)
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.entity_type.alias_prefix(), self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub alias: Alias,
    pub field: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(Column),
    Value(Value),
}

macro_rules! operand_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Value(value.into())
                }
            }
        )*
    };
}

operand_from_value!(Value, bool, i64, &str, String, uuid::Uuid, chrono::NaiveDate);

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Column(c) => write!(f, "{}.{}", c.alias, c.field),
            Operand::Value(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// An inner join inside a subquery
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub alias: Alias,
    pub on: Predicate,
}

/// A nested query: one root source, inner joins, one filter
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub from: Alias,
    pub joins: Vec<Join>,
    pub filter: Predicate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    True,
    False,
    Compare {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
    IsNull(Operand),
    IsNotNull(Operand),
    In {
        operand: Operand,
        values: Vec<Value>,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Exists(Box<Subquery>),
}

impl Predicate {
    pub fn compare(left: impl Into<Operand>, op: CompareOp, right: impl Into<Operand>) -> Self {
        Predicate::Compare {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    pub fn eq(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::compare(left, CompareOp::Eq, right)
    }

    pub fn ne(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::compare(left, CompareOp::Ne, right)
    }

    pub fn le(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::compare(left, CompareOp::Le, right)
    }

    pub fn ge(left: impl Into<Operand>, right: impl Into<Operand>) -> Self {
        Self::compare(left, CompareOp::Ge, right)
    }

    pub fn is_null(operand: impl Into<Operand>) -> Self {
        Predicate::IsNull(operand.into())
    }

    pub fn is_not_null(operand: impl Into<Operand>) -> Self {
        Predicate::IsNotNull(operand.into())
    }

    pub fn in_list(operand: impl Into<Operand>, values: Vec<Value>) -> Self {
        Predicate::In {
            operand: operand.into(),
            values,
        }
    }

    /// Conjunction; `True` members are dropped, nested `And`s flattened
    pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        let mut members = Vec::new();
        for predicate in predicates {
            match predicate {
                Predicate::True => {}
                Predicate::False => return Predicate::False,
                Predicate::And(inner) => members.extend(inner),
                other => members.push(other),
            }
        }
        match members.len() {
            0 => Predicate::True,
            1 => members.remove(0),
            _ => Predicate::And(members),
        }
    }

    /// Disjunction; `False` members are dropped, nested `Or`s flattened
    pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        let mut members = Vec::new();
        for predicate in predicates {
            match predicate {
                Predicate::False => {}
                Predicate::True => return Predicate::True,
                Predicate::Or(inner) => members.extend(inner),
                other => members.push(other),
            }
        }
        match members.len() {
            0 => Predicate::False,
            1 => members.remove(0),
            _ => Predicate::Or(members),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(predicate: Predicate) -> Self {
        match predicate {
            Predicate::True => Predicate::False,
            Predicate::False => Predicate::True,
            Predicate::Not(inner) => *inner,
            other => Predicate::Not(Box::new(other)),
        }
    }

    pub fn exists(subquery: Subquery) -> Self {
        Predicate::Exists(Box::new(subquery))
    }

    /// Number of EXISTS nodes in the tree, nested ones included
    pub fn exists_count(&self) -> usize {
        match self {
            Predicate::Exists(sub) => {
                1 + sub.filter.exists_count()
                    + sub.joins.iter().map(|j| j.on.exists_count()).sum::<usize>()
            }
            Predicate::And(members) | Predicate::Or(members) => {
                members.iter().map(Predicate::exists_count).sum()
            }
            Predicate::Not(inner) => inner.exists_count(),
            _ => 0,
        }
    }

    /// Whether any subquery in the tree reads the given entity type
    pub fn references(&self, entity_type: EntityType) -> bool {
        match self {
            Predicate::Exists(sub) => {
                sub.from.entity_type() == entity_type
                    || sub.joins.iter().any(|j| {
                        j.alias.entity_type() == entity_type || j.on.references(entity_type)
                    })
                    || sub.filter.references(entity_type)
            }
            Predicate::And(members) | Predicate::Or(members) => {
                members.iter().any(|p| p.references(entity_type))
            }
            Predicate::Not(inner) => inner.references(entity_type),
            _ => false,
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[Predicate], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", member)?;
    }
    write!(f, ")")
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::True => write!(f, "TRUE"),
            Predicate::False => write!(f, "FALSE"),
            Predicate::Compare { left, op, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            Predicate::IsNull(o) => write!(f, "{} IS NULL", o),
            Predicate::IsNotNull(o) => write!(f, "{} IS NOT NULL", o),
            Predicate::In { operand, values } => {
                write!(f, "{} IN (", operand)?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
            Predicate::And(members) => write_joined(f, members, "AND"),
            Predicate::Or(members) => write_joined(f, members, "OR"),
            Predicate::Not(inner) => write!(f, "NOT ({})", inner),
            Predicate::Exists(sub) => write!(f, "EXISTS ({})", sub),
        }
    }
}

impl fmt::Display for Subquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FROM {} {}", self.from.entity_type().table(), self.from)?;
        for join in &self.joins {
            write!(
                f,
                " JOIN {} {} ON {}",
                join.alias.entity_type().table(),
                join.alias,
                join.on
            )?;
        }
        write!(f, " WHERE {}", self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields::identity;

    fn root() -> Alias {
        Alias::new(EntityType::Identity, 0)
    }

    #[test]
    fn test_and_simplification() {
        let p = Predicate::eq(root().col(identity::USERNAME), "a");
        assert_eq!(Predicate::and([Predicate::True, p.clone()]), p);
        assert_eq!(Predicate::and([]), Predicate::True);
        assert_eq!(
            Predicate::and([p.clone(), Predicate::False]),
            Predicate::False
        );
    }

    #[test]
    fn test_or_simplification() {
        let p = Predicate::eq(root().col(identity::USERNAME), "a");
        assert_eq!(Predicate::or([Predicate::False, p.clone()]), p);
        assert_eq!(Predicate::or([]), Predicate::False);
        assert_eq!(Predicate::or([p, Predicate::True]), Predicate::True);
    }

    #[test]
    fn test_nested_flattening() {
        let a = Predicate::is_null(root().col(identity::STATE));
        let b = Predicate::is_not_null(root().col(identity::STATE));
        let c = Predicate::eq(root().col(identity::DISABLED), false);
        let nested = Predicate::and([Predicate::and([a.clone(), b.clone()]), c.clone()]);
        assert_eq!(nested, Predicate::And(vec![a, b, c]));
    }

    #[test]
    fn test_double_negation() {
        let p = Predicate::is_null(root().col(identity::STATE));
        assert_eq!(Predicate::not(Predicate::not(p.clone())), p);
    }

    #[test]
    fn test_display() {
        let p = Predicate::and([
            Predicate::eq(root().col(identity::USERNAME), "jdoe"),
            Predicate::eq(root().col(identity::DISABLED), false),
        ]);
        assert_eq!(
            p.to_string(),
            "(i0.username = 'jdoe' AND i0.disabled = false)"
        );
    }

    #[test]
    fn test_exists_count_and_references() {
        let contract = Alias::new(EntityType::Contract, 1);
        let sub = Subquery {
            from: contract,
            joins: vec![],
            filter: Predicate::eq(contract.col(fields::contract::IDENTITY), root().id()),
        };
        let p = Predicate::or([Predicate::exists(sub.clone()), Predicate::exists(sub)]);
        assert_eq!(p.exists_count(), 2);
        assert!(p.references(EntityType::Contract));
        assert!(!p.references(EntityType::ContractGuarantee));
    }
}
