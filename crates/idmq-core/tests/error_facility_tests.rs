use idmq_core::errors::{FilterError, IdmError, IdmErrorKind};

#[test]
fn test_not_found_override_verifiable_by_kind() {
    let err = FilterError::ImplementationNotFound {
        property: "managersFor".to_string(),
        implementation: "org-chart-managers-filter".to_string(),
        config_key: "idm.sec.core.filter.identity.managersFor.impl".to_string(),
    };

    let idm_err: IdmError = err.into();

    assert_eq!(idm_err.kind(), IdmErrorKind::Configuration);
    assert_eq!(idm_err.code(), "ERR_CONFIGURATION");
    assert_eq!(idm_err.property(), Some("managersFor"));
    assert!(idm_err.message().contains("org-chart-managers-filter"));
}

#[test]
fn test_unsupported_distinct_from_configuration() {
    let err = FilterError::UnsupportedOperation {
        implementation: "eav-code-subordinates-filter".to_string(),
        property: "subordinatesFor".to_string(),
    };

    let idm_err: IdmError = err.into();

    assert_eq!(idm_err.kind(), IdmErrorKind::UnsupportedOperation);
    assert_ne!(idm_err.kind(), IdmErrorKind::Configuration);
    assert_eq!(idm_err.property(), Some("subordinatesFor"));
}

#[test]
fn test_key_mismatch_carries_config_key() {
    let err = FilterError::ImplementationKeyMismatch {
        implementation: "tree-subordinates-filter".to_string(),
        expected: "identity.managersFor".to_string(),
        actual: "identity.subordinatesFor".to_string(),
        config_key: "idm.sec.core.filter.identity.managersFor.impl".to_string(),
    };

    let idm_err: IdmError = err.into();

    assert_eq!(idm_err.code(), "ERR_CONFIGURATION");
    assert_eq!(
        idm_err.config_key(),
        Some("idm.sec.core.filter.identity.managersFor.impl")
    );
    assert!(idm_err.message().contains("identity.subordinatesFor"));
}

#[test]
fn test_invalid_value_structured_fields() {
    let err = FilterError::InvalidFilterValue {
        property: "validContractManagers".to_string(),
        expected: "bool".to_string(),
        found: "text".to_string(),
    };

    let idm_err: IdmError = err.into();

    assert_eq!(idm_err.kind(), IdmErrorKind::InvalidInput);
    assert_eq!(idm_err.code(), "ERR_INVALID_INPUT");
    assert_eq!(idm_err.property(), Some("validContractManagers"));
}

#[test]
fn test_lookup_is_persistence() {
    let err = FilterError::Lookup {
        entity_type: "identity".to_string(),
        reason: "database is locked".to_string(),
    };

    let idm_err: IdmError = err.into();

    assert_eq!(idm_err.kind(), IdmErrorKind::Persistence);
    assert_eq!(idm_err.entity_type(), Some("identity"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (IdmErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (IdmErrorKind::Configuration, "ERR_CONFIGURATION"),
        (IdmErrorKind::UnsupportedOperation, "ERR_UNSUPPORTED_OPERATION"),
        (IdmErrorKind::NotFound, "ERR_NOT_FOUND"),
        (IdmErrorKind::Io, "ERR_IO"),
        (IdmErrorKind::Serialization, "ERR_SERIALIZATION"),
        (IdmErrorKind::Persistence, "ERR_PERSISTENCE"),
        (IdmErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_display_renders_context() {
    let err = IdmError::new(IdmErrorKind::Configuration)
        .with_op("resolve_builder")
        .with_config_key("idm.sec.core.filter.identity.username.impl")
        .with_message("unknown implementation");

    let rendered = err.to_string();
    assert!(rendered.starts_with("[ERR_CONFIGURATION] in operation 'resolve_builder'"));
    assert!(rendered.ends_with("(config_key: idm.sec.core.filter.identity.username.impl)"));
}
