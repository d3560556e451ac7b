use thiserror::Error;

/// Result type alias using FilterError
pub type Result<T> = std::result::Result<T, FilterError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// tests and external responses. None of these kinds is transient: a
/// configuration or unsupported-operation failure is a deployment or call-site
/// defect and is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdmErrorKind {
    // Filter composition
    InvalidInput,
    Configuration,
    UnsupportedOperation,
    NotFound,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl IdmErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            IdmErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            IdmErrorKind::Configuration => "ERR_CONFIGURATION",
            IdmErrorKind::UnsupportedOperation => "ERR_UNSUPPORTED_OPERATION",
            IdmErrorKind::NotFound => "ERR_NOT_FOUND",
            IdmErrorKind::Io => "ERR_IO",
            IdmErrorKind::Serialization => "ERR_SERIALIZATION",
            IdmErrorKind::Persistence => "ERR_PERSISTENCE",
            IdmErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus the filter context (operation, entity
/// type, property, configuration key) the failure was raised in.
#[derive(Debug, Clone)]
pub struct IdmError {
    kind: IdmErrorKind,
    op: Option<String>,
    entity_type: Option<String>,
    property: Option<String>,
    config_key: Option<String>,
    message: String,
}

impl IdmError {
    /// Create a new error with the specified kind
    pub fn new(kind: IdmErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_type: None,
            property: None,
            config_key: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity type context
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Add filter property context
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Add configuration key context
    pub fn with_config_key(mut self, key: impl Into<String>) -> Self {
        self.config_key = Some(key.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> IdmErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    pub fn config_key(&self) -> Option<&str> {
        self.config_key.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for IdmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(property) = &self.property {
            write!(f, " (property: {})", property)?;
        }
        if let Some(key) = &self.config_key {
            write!(f, " (config_key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for IdmError {}

// ========== End Error Facility ==========

/// Failures raised while resolving builders and composing predicates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A configuration override names an implementation nobody registered
    #[error("Filter implementation '{implementation}' for property '{property}' not found (configured by '{config_key}')")]
    ImplementationNotFound {
        property: String,
        implementation: String,
        config_key: String,
    },

    /// A configuration override names a builder serving another filter key
    #[error("Filter implementation '{implementation}' serves '{actual}', not '{expected}' (configured by '{config_key}')")]
    ImplementationKeyMismatch {
        implementation: String,
        expected: String,
        actual: String,
        config_key: String,
    },

    /// Two builders were installed under the same implementation name
    #[error("Filter implementation '{implementation}' is registered more than once")]
    DuplicateImplementation { implementation: String },

    /// A sub-predicate-only builder was asked for a standalone lookup
    #[error("Filter '{implementation}' for property '{property}' is supported only inside a composed query")]
    UnsupportedOperation {
        implementation: String,
        property: String,
    },

    /// A filter value cannot be read as the type the builder needs
    #[error("Invalid value for filter property '{property}': expected {expected}, found {found}")]
    InvalidFilterValue {
        property: String,
        expected: String,
        found: String,
    },

    /// The filter targets another entity type than the query it is applied to
    #[error("Filter scoped to '{filter}' cannot be applied to a '{scope}' query")]
    EntityTypeMismatch { filter: String, scope: String },

    /// A configuration value or document is malformed
    #[error("Invalid configuration '{key}': {reason}")]
    InvalidConfiguration { key: String, reason: String },

    /// A direct lookup against an entity source failed
    #[error("Lookup of {entity_type} failed: {reason}")]
    Lookup { entity_type: String, reason: String },

    /// Builders were resolved before the component registry was installed
    #[error("Component registry has not been installed")]
    RegistryNotInstalled,
}

impl From<FilterError> for IdmError {
    fn from(err: FilterError) -> Self {
        let message = err.to_string();
        match err {
            FilterError::ImplementationNotFound {
                property,
                config_key,
                ..
            } => IdmError::new(IdmErrorKind::Configuration)
                .with_property(property)
                .with_config_key(config_key)
                .with_message(message),
            FilterError::ImplementationKeyMismatch { config_key, .. } => {
                IdmError::new(IdmErrorKind::Configuration)
                    .with_config_key(config_key)
                    .with_message(message)
            }
            FilterError::DuplicateImplementation { .. } => {
                IdmError::new(IdmErrorKind::Configuration).with_message(message)
            }
            FilterError::UnsupportedOperation { property, .. } => {
                IdmError::new(IdmErrorKind::UnsupportedOperation)
                    .with_property(property)
                    .with_message(message)
            }
            FilterError::InvalidFilterValue { property, .. } => {
                IdmError::new(IdmErrorKind::InvalidInput)
                    .with_property(property)
                    .with_message(message)
            }
            FilterError::EntityTypeMismatch { scope, .. } => {
                IdmError::new(IdmErrorKind::InvalidInput)
                    .with_entity_type(scope)
                    .with_message(message)
            }
            FilterError::InvalidConfiguration { key, .. } => {
                IdmError::new(IdmErrorKind::Configuration)
                    .with_config_key(key)
                    .with_message(message)
            }
            FilterError::Lookup { entity_type, .. } => IdmError::new(IdmErrorKind::Persistence)
                .with_entity_type(entity_type)
                .with_message(message),
            FilterError::RegistryNotInstalled => {
                IdmError::new(IdmErrorKind::Internal).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_context() {
        let err = IdmError::new(IdmErrorKind::Configuration)
            .with_op("resolve_builder")
            .with_property("managersFor")
            .with_message("boom");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_CONFIGURATION]"));
        assert!(rendered.contains("resolve_builder"));
        assert!(rendered.contains("managersFor"));
    }

    #[test]
    fn test_unsupported_maps_to_its_own_kind() {
        let err: IdmError = FilterError::UnsupportedOperation {
            implementation: "tree-managers-filter".to_string(),
            property: "managersFor".to_string(),
        }
        .into();
        assert_eq!(err.kind(), IdmErrorKind::UnsupportedOperation);
        assert_eq!(err.property(), Some("managersFor"));
    }
}
