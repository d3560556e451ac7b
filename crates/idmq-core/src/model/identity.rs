use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{fields, EntityType};
use super::Record;
use crate::value::Value;

/// Lifecycle state of an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityState {
    Created,
    Valid,
    FutureContract,
    Left,
    Disabled,
    DisabledManually,
}

impl IdentityState {
    pub const ALL: [IdentityState; 6] = [
        IdentityState::Created,
        IdentityState::Valid,
        IdentityState::FutureContract,
        IdentityState::Left,
        IdentityState::Disabled,
        IdentityState::DisabledManually,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityState::Created => "CREATED",
            IdentityState::Valid => "VALID",
            IdentityState::FutureContract => "FUTURE_CONTRACT",
            IdentityState::Left => "LEFT",
            IdentityState::Disabled => "DISABLED",
            IdentityState::DisabledManually => "DISABLED_MANUALLY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|state| state.as_str() == s)
    }
}

/// A person (or service account) known to the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    /// Unique login name
    pub username: String,
    pub disabled: bool,
    pub state: IdentityState,
}

impl Identity {
    /// Create a valid, enabled identity with a fresh UUID v7
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            disabled: false,
            state: IdentityState::Valid,
        }
    }

    pub fn with_state(mut self, state: IdentityState) -> Self {
        self.state = state;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl Record for Identity {
    fn entity_type(&self) -> EntityType {
        EntityType::Identity
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Value {
        match name {
            fields::ID => Value::Uuid(self.id),
            fields::identity::USERNAME => Value::Text(self.username.clone()),
            fields::identity::DISABLED => Value::Bool(self.disabled),
            fields::identity::STATE => Value::Text(self.state.as_str().to_string()),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_identity() {
        let identity = Identity::new("jdoe");
        assert_eq!(identity.username, "jdoe");
        assert!(!identity.disabled);
        assert_eq!(identity.state, IdentityState::Valid);
        assert_eq!(identity.field("username"), Value::from("jdoe"));
        assert_eq!(identity.field("nonexistent"), Value::Null);
    }

    #[test]
    fn test_state_names_round_trip() {
        for state in IdentityState::ALL {
            assert_eq!(IdentityState::parse(state.as_str()), Some(state));
        }
    }
}
