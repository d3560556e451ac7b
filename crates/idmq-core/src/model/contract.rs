use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{fields, EntityType};
use super::Record;
use crate::value::Value;

/// Explicit contract state; a contract without one is governed by its
/// validity window and disabled flag alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractState {
    Disabled,
    Excluded,
}

impl ContractState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractState::Disabled => "DISABLED",
            ContractState::Excluded => "EXCLUDED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DISABLED" => Some(ContractState::Disabled),
            "EXCLUDED" => Some(ContractState::Excluded),
            _ => None,
        }
    }
}

/// A time-bounded assignment of an identity to an organizational position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    /// Owning identity
    pub identity: Uuid,
    /// Work position (tree node), if assigned
    pub work_position: Option<Uuid>,
    pub position: Option<String>,
    /// Open-ended when `None`
    pub valid_from: Option<NaiveDate>,
    /// Open-ended when `None`
    pub valid_till: Option<NaiveDate>,
    pub disabled: bool,
    pub state: Option<ContractState>,
    /// Prime contract of the identity
    pub main: bool,
}

impl Contract {
    /// Create an open-ended, enabled contract for an identity
    pub fn new(identity: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            identity,
            work_position: None,
            position: None,
            valid_from: None,
            valid_till: None,
            disabled: false,
            state: None,
            main: true,
        }
    }

    pub fn at(mut self, work_position: Uuid) -> Self {
        self.work_position = Some(work_position);
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn valid_from(mut self, date: NaiveDate) -> Self {
        self.valid_from = Some(date);
        self
    }

    pub fn valid_till(mut self, date: NaiveDate) -> Self {
        self.valid_till = Some(date);
        self
    }

    pub fn with_state(mut self, state: ContractState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn secondary(mut self) -> Self {
        self.main = false;
        self
    }

    /// Valid on `date` or at some point after it
    pub fn is_valid_now_or_in_future(&self, date: NaiveDate) -> bool {
        self.valid_till.map_or(true, |till| till >= date)
    }
}

impl Record for Contract {
    fn entity_type(&self) -> EntityType {
        EntityType::Contract
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::contract::IDENTITY => Value::Uuid(self.identity),
            fields::contract::WORK_POSITION => self.work_position.into(),
            fields::contract::POSITION => self.position.clone().into(),
            fields::contract::VALID_FROM => self.valid_from.into(),
            fields::contract::VALID_TILL => self.valid_till.into(),
            fields::contract::DISABLED => Value::Bool(self.disabled),
            fields::contract::STATE => self.state.map(|s| s.as_str()).into(),
            fields::contract::MAIN => Value::Bool(self.main),
            _ => Value::Null,
        }
    }
}

/// An identity explicitly designated as manager of a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractGuarantee {
    pub id: Uuid,
    pub contract: Uuid,
    /// The managing identity
    pub guarantee: Uuid,
}

impl ContractGuarantee {
    pub fn new(contract: Uuid, guarantee: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            contract,
            guarantee,
        }
    }
}

impl Record for ContractGuarantee {
    fn entity_type(&self) -> EntityType {
        EntityType::ContractGuarantee
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::guarantee::CONTRACT => Value::Uuid(self.contract),
            fields::guarantee::GUARANTEE => Value::Uuid(self.guarantee),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_ended_contract_fields() {
        let owner = Uuid::now_v7();
        let contract = Contract::new(owner);
        assert_eq!(
            contract.field(fields::contract::IDENTITY),
            Value::Uuid(owner)
        );
        assert_eq!(contract.field(fields::contract::VALID_TILL), Value::Null);
        assert_eq!(contract.field(fields::contract::STATE), Value::Null);
        assert!(contract.is_valid_now_or_in_future(date(2030, 1, 1)));
    }

    #[test]
    fn test_excluded_state_is_text() {
        let contract = Contract::new(Uuid::now_v7()).with_state(ContractState::Excluded);
        assert_eq!(
            contract.field(fields::contract::STATE),
            Value::from("EXCLUDED")
        );
        assert_eq!(
            ContractState::parse("EXCLUDED"),
            Some(ContractState::Excluded)
        );
    }

    #[test]
    fn test_expired_contract_not_valid() {
        let contract = Contract::new(Uuid::now_v7()).valid_till(date(2020, 1, 1));
        assert!(!contract.is_valid_now_or_in_future(date(2020, 1, 2)));
        assert!(contract.is_valid_now_or_in_future(date(2020, 1, 1)));
    }
}
