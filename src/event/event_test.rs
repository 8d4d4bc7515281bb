use super::*;

/// Test: unknown wire fields survive a decode round trip untouched.
#[test]
fn test_unknown_fields_are_retained() {
    let raw = r#"{"type":"container","action":"create","id":"abc123","scope":"local"}"#;

    let event: Event = serde_json::from_str(raw).expect("valid record");

    assert_eq!(event.resource_type, "container");
    assert_eq!(event.action, "create");
    assert_eq!(
        event.attributes.get("id"),
        Some(&serde_json::Value::String("abc123".into()))
    );
    assert_eq!(
        event.attributes.get("scope"),
        Some(&serde_json::Value::String("local".into()))
    );
}

/// Test: missing routing fields decode to empty strings, not an error.
#[test]
fn test_missing_routing_fields_default_empty() {
    let event: Event = serde_json::from_str("{}").expect("empty object is valid");

    assert_eq!(event.resource_type, "");
    assert_eq!(event.action, "");
}

/// Test: a bare JSON string is not a valid record.
#[test]
fn test_non_object_record_is_rejected() {
    assert!(serde_json::from_str::<Event>(r#""""#).is_err());
}

/// Test: classifiers are deterministic for the same event.
#[test]
fn test_classifiers_are_deterministic() {
    let event = Event::new("network", "destroy");

    assert_eq!(by_type(&event), by_type(&event));
    assert_eq!(by_type(&event), "network");
    assert_eq!(by_action(&event), by_action(&event));
    assert_eq!(by_action(&event), "destroy");
}
