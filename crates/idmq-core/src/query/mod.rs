//! Predicate trees, query scopes and in-memory evaluation

pub mod eval;
pub mod predicate;
pub mod scope;

pub use eval::{matches, select, RowSource};
pub use predicate::{Alias, Column, CompareOp, Join, Operand, Predicate, Subquery};
pub use scope::{QueryScope, SubqueryBuilder};
