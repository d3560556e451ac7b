//! Stable filter property names used by calling code

/// Entity id, single value or list
pub const ID: &str = "id";

// Identity
pub const USERNAME: &str = "username";
pub const DISABLED: &str = "disabled";
pub const STATE: &str = "state";

// Hierarchy
pub const MANAGERS_FOR: &str = "managersFor";
pub const MANAGERS_BY_CONTRACT: &str = "managersByContract";
pub const MANAGERS_BY_TREE_TYPE: &str = "managersByTreeType";
pub const SUBORDINATES_FOR: &str = "subordinatesFor";
pub const SUBORDINATES_BY_TREE_TYPE: &str = "subordinatesByTreeType";
pub const INCLUDE_GUARANTEES: &str = "includeGuarantees";
pub const VALID_CONTRACT_MANAGERS: &str = "validContractManagers";

// Contract
pub const IDENTITY: &str = "identity";
pub const WORK_POSITION: &str = "workPosition";
pub const VALID_FROM: &str = "validFrom";
pub const VALID_TILL: &str = "validTill";
pub const VALID: &str = "valid";
pub const VALID_NOW_OR_IN_FUTURE: &str = "validNowOrInFuture";
pub const EXCLUDED: &str = "excluded";

// Tree node / role
pub const CODE: &str = "code";
pub const PARENT: &str = "parent";
pub const TREE_TYPE: &str = "treeType";
