//! Validity predicates over contract aliases
//!
//! All hierarchy builders treat a contract as currently valid when it has
//! not ended yet: `valid_till IS NULL OR valid_till >= today`. The strict
//! form that also requires `valid_from <= today` is used only by the
//! contract `valid` criterion.

use chrono::NaiveDate;

use crate::model::fields::contract;
use crate::model::ContractState;
use crate::query::{Alias, Predicate};

/// Tri-state validity policy driven by an optional filter flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityPolicy {
    /// Flag absent: no constraint
    #[default]
    Any,
    /// Flag `true`
    ValidNowOrInFuture,
    /// Flag `false`: the negation, for stale or orphaned relationships
    NotValidNowOrInFuture,
}

impl ValidityPolicy {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            None => ValidityPolicy::Any,
            Some(true) => ValidityPolicy::ValidNowOrInFuture,
            Some(false) => ValidityPolicy::NotValidNowOrInFuture,
        }
    }

    /// Predicate for a contract alias, `None` when unconstrained
    pub fn predicate(&self, contract: Alias, today: NaiveDate) -> Option<Predicate> {
        match self {
            ValidityPolicy::Any => None,
            ValidityPolicy::ValidNowOrInFuture => Some(valid_now_or_in_future(contract, today)),
            ValidityPolicy::NotValidNowOrInFuture => {
                Some(Predicate::not(valid_now_or_in_future(contract, today)))
            }
        }
    }
}

/// `valid_till IS NULL OR valid_till >= today`
///
/// Never unknown, so its negation selects exactly the ended contracts.
pub fn valid_now_or_in_future(contract: Alias, today: NaiveDate) -> Predicate {
    Predicate::or([
        Predicate::is_null(contract.col(contract::VALID_TILL)),
        Predicate::ge(contract.col(contract::VALID_TILL), today),
    ])
}

/// Valid on `today`: started and not ended
pub fn valid_now(contract: Alias, today: NaiveDate) -> Predicate {
    Predicate::and([
        Predicate::or([
            Predicate::is_null(contract.col(contract::VALID_FROM)),
            Predicate::le(contract.col(contract::VALID_FROM), today),
        ]),
        valid_now_or_in_future(contract, today),
    ])
}

/// Not disabled and not excluded; a null state counts as not excluded
pub fn active_contract(contract: Alias) -> Predicate {
    Predicate::and([
        Predicate::eq(contract.col(contract::DISABLED), false),
        excluded(contract, false),
    ])
}

/// `state = EXCLUDED`, or its null-safe negation
pub fn excluded(contract: Alias, excluded: bool) -> Predicate {
    let state = ContractState::Excluded.as_str();
    if excluded {
        Predicate::eq(contract.col(contract::STATE), state)
    } else {
        Predicate::or([
            Predicate::is_null(contract.col(contract::STATE)),
            Predicate::ne(contract.col(contract::STATE), state),
        ])
    }
}

/// Conditions every contract carrying a hierarchy relationship must meet
pub fn relationship_contract(
    contract: Alias,
    policy: ValidityPolicy,
    today: NaiveDate,
) -> Predicate {
    Predicate::and(
        [active_contract(contract)]
            .into_iter()
            .chain(policy.predicate(contract, today)),
    )
}
