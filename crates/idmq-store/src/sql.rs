//! SQL rendering of predicate trees
//!
//! Literals become positional `?` parameters; column references keep their
//! query alias (`c1.identity_id`). The rendered text is valid inside the
//! `WHERE` clause of a query whose root source uses the scope's root alias.

use idmq_core::query::{Operand, Predicate, Subquery};
use idmq_core::value::DATE_FORMAT;
use idmq_core::Value;
use rusqlite::types::Value as SqlValue;

/// Rendered SQL text plus its positional parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl SqlFragment {
    /// Render the conjunction of `predicates`, `1 = 1` when there are none
    pub fn conjunction(predicates: &[Predicate]) -> Self {
        let mut fragment = Self::default();
        if predicates.is_empty() {
            fragment.sql.push_str("1 = 1");
            return fragment;
        }
        fragment.push_joined(predicates, "AND");
        fragment
    }

    pub fn render(predicate: &Predicate) -> Self {
        let mut fragment = Self::default();
        fragment.push_predicate(predicate);
        fragment
    }

    fn push_predicate(&mut self, predicate: &Predicate) {
        match predicate {
            Predicate::True => self.sql.push_str("1 = 1"),
            Predicate::False => self.sql.push_str("1 = 0"),
            Predicate::Compare { left, op, right } => {
                self.push_operand(left);
                self.sql.push(' ');
                self.sql.push_str(op.symbol());
                self.sql.push(' ');
                self.push_operand(right);
            }
            Predicate::IsNull(operand) => {
                self.push_operand(operand);
                self.sql.push_str(" IS NULL");
            }
            Predicate::IsNotNull(operand) => {
                self.push_operand(operand);
                self.sql.push_str(" IS NOT NULL");
            }
            Predicate::In { values, .. } if values.is_empty() => self.sql.push_str("1 = 0"),
            Predicate::In { operand, values } => {
                self.push_operand(operand);
                self.sql.push_str(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.sql.push_str(", ");
                    }
                    self.push_value(value);
                }
                self.sql.push(')');
            }
            Predicate::And(members) if members.is_empty() => self.sql.push_str("1 = 1"),
            Predicate::Or(members) if members.is_empty() => self.sql.push_str("1 = 0"),
            Predicate::And(members) => self.push_joined(members, "AND"),
            Predicate::Or(members) => self.push_joined(members, "OR"),
            Predicate::Not(inner) => {
                self.sql.push_str("NOT (");
                self.push_predicate(inner);
                self.sql.push(')');
            }
            Predicate::Exists(subquery) => {
                self.sql.push_str("EXISTS (");
                self.push_subquery(subquery);
                self.sql.push(')');
            }
        }
    }

    fn push_joined(&mut self, members: &[Predicate], separator: &str) {
        self.sql.push('(');
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                self.sql.push(' ');
                self.sql.push_str(separator);
                self.sql.push(' ');
            }
            self.push_predicate(member);
        }
        self.sql.push(')');
    }

    fn push_subquery(&mut self, subquery: &Subquery) {
        self.sql.push_str(&format!(
            "SELECT 1 FROM {} {}",
            subquery.from.entity_type().table(),
            subquery.from
        ));
        for join in &subquery.joins {
            self.sql.push_str(&format!(
                " JOIN {} {} ON ",
                join.alias.entity_type().table(),
                join.alias
            ));
            self.push_predicate(&join.on);
        }
        self.sql.push_str(" WHERE ");
        self.push_predicate(&subquery.filter);
    }

    fn push_operand(&mut self, operand: &Operand) {
        match operand {
            Operand::Column(column) => {
                self.sql.push_str(&format!("{}.{}", column.alias, column.field));
            }
            Operand::Value(value) => self.push_value(value),
        }
    }

    fn push_value(&mut self, value: &Value) {
        self.sql.push('?');
        self.params.push(to_sql(value));
    }
}

/// Storage representation of a value
pub fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Int(i) => SqlValue::Integer(*i),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Uuid(u) => SqlValue::Text(u.to_string()),
        Value::Date(d) => SqlValue::Text(d.format(DATE_FORMAT).to_string()),
    }
}
