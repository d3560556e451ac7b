//! Field keys and event names of idmq's structured log events
//!
//! Every filter operation event carries `component`, `op` and `event`;
//! resolution events add the filter key and implementation, failures add
//! the stable error code.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Filter resolution
pub const FIELD_ENTITY_TYPE: &str = "entity_type";
pub const FIELD_PROPERTY: &str = "property";
pub const FIELD_IMPLEMENTATION: &str = "implementation";
pub const FIELD_CONFIG_KEY: &str = "config_key";

// Collection sizes
pub const FIELD_PROPERTY_COUNT: &str = "property_count";
pub const FIELD_PREDICATE_COUNT: &str = "predicate_count";
pub const FIELD_BUILDER_COUNT: &str = "builder_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_PROPERTY: &str = "err_property";
pub const FIELD_ERR_CONFIG_KEY: &str = "err_config_key";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_PROPERTY.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_resolution_fields_are_distinct() {
        let fields = [
            FIELD_ENTITY_TYPE,
            FIELD_PROPERTY,
            FIELD_IMPLEMENTATION,
            FIELD_CONFIG_KEY,
        ];
        for (i, a) in fields.iter().enumerate() {
            for b in fields.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
