//! Resolver Tests
//!
//! Construction of records from positional inputs against a private registry.

use std::sync::Arc;

use error_trace::codes::{ERROR_GENERATE_PARAMETER_INVALID, ERROR_GENERIC, ERROR_INTERNAL};
use error_trace::{inputs, Args, ErrorRecord, Input, Registry, Resolver};
use serde_json::json;

fn resolver() -> Resolver {
    Resolver::new(Arc::new(Registry::new()))
}

fn args(pairs: &[(&str, serde_json::Value)]) -> Args {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// =============================================================================
// Head Inputs
// =============================================================================

#[test]
fn test_construct_without_inputs_is_generic() {
    let record = resolver().construct(inputs![]);
    assert_eq!(record.code, ERROR_GENERIC);
    assert_eq!(record.msg, "An error has occurred");
    assert!(record.args.is_empty());
}

#[test]
fn test_unregistered_code_inherits_generic_message() {
    let record = resolver().construct(inputs!["UNREGISTERED_X"]);
    assert_eq!(record.code, "UNREGISTERED_X");
    assert_eq!(record.msg, "An error has occurred");
}

#[test]
fn test_registered_code_loads_template() {
    let record = resolver().construct(inputs![ERROR_INTERNAL]);
    assert_eq!(record.code, ERROR_INTERNAL);
    assert_eq!(record.msg, "An internal error has occurred");
}

#[test]
fn test_code_message_and_args() {
    let record = resolver().construct(inputs![
        "ERROR_CUSTOM",
        "custom msg",
        args(&[("key", json!("value"))])
    ]);
    assert_eq!(record.code, "ERROR_CUSTOM");
    assert_eq!(record.msg, "custom msg");
    assert_eq!(record.args, args(&[("key", json!("value"))]));
}

#[test]
fn test_registered_code_with_overrides() {
    let record = resolver().construct(inputs![
        ERROR_GENERIC,
        "different generic error message",
        args(&[("key", json!("generic key"))])
    ]);
    assert_eq!(record.code, ERROR_GENERIC);
    assert_eq!(record.msg, "different generic error message");
    assert_eq!(record.arg("key"), Some(&json!("generic key")));
}

#[test]
fn test_error_head_uses_error_text() {
    let error = std::io::Error::new(std::io::ErrorKind::Other, "error text");
    let record = resolver().construct(vec![Input::from_error(&error)]);
    assert_eq!(record.code, ERROR_GENERIC);
    assert_eq!(record.msg, "error text");
}

#[test]
fn test_record_head_with_message_override() {
    let source = ErrorRecord::new("ERROR_SRC", "original").with_arg("key", "value");
    let record = resolver().construct(inputs![source.clone(), "overridden"]);
    assert_eq!(record.code, "ERROR_SRC");
    assert_eq!(record.msg, "overridden");
    assert_eq!(record.args, source.args);
}

#[test]
fn test_unsupported_head_fails() {
    let (record, ok) = resolver().generate(inputs![42]);
    assert!(!ok);
    assert_eq!(record.code, ERROR_GENERATE_PARAMETER_INVALID);
    assert_eq!(record.arg("error_item"), Some(&json!(42)));
    assert_eq!(record.arg("args"), Some(&json!([])));
}

#[test]
fn test_unsupported_head_skips_remaining_inputs() {
    let (record, ok) = resolver().generate(inputs![json!(null), "not a message", args(&[("a", json!(1))])]);
    assert!(!ok);
    assert_eq!(record.msg, "Unable to generate error element, parameter invalid");
    assert_eq!(record.arg("args"), Some(&json!(["not a message", {"a": 1}])));
    assert!(record.arg("a").is_none());
}

#[test]
fn test_list_head_is_unsupported_for_records() {
    let (record, ok) = resolver().generate(inputs![vec![ErrorRecord::generic()]]);
    assert!(!ok);
    assert_eq!(record.code, ERROR_GENERATE_PARAMETER_INVALID);
}

// =============================================================================
// Registry Interaction
// =============================================================================

#[test]
fn test_registration_visible_to_resolver() {
    let registry = Arc::new(Registry::new());
    let resolver = Resolver::new(registry.clone());

    assert_eq!(resolver.code("ERROR_LATE").msg, "An error has occurred");
    registry.register_code("ERROR_LATE", "registered later");
    assert_eq!(resolver.code("ERROR_LATE").msg, "registered later");
}

#[test]
fn test_load_does_not_copy_template_args() {
    let registry = Arc::new(Registry::new());
    registry.register_one(ErrorRecord::new("ERROR_WITH_ARGS", "m").with_arg("template", true));
    let resolver = Resolver::new(registry.clone());

    let record = resolver.code("ERROR_WITH_ARGS");
    assert_eq!(record.msg, "m");
    assert!(record.args.is_empty());
    assert_eq!(registry.lookup("ERROR_WITH_ARGS").arg("template"), Some(&json!(true)));
}

#[test]
fn test_builders() {
    let resolver = resolver();
    let record = resolver.code_with_message("ERROR_B", "built");
    assert_eq!((record.code.as_str(), record.msg.as_str()), ("ERROR_B", "built"));

    let record = resolver.full("ERROR_B", "built", args(&[("n", json!(3))]));
    assert_eq!(record.arg("n"), Some(&json!(3)));
}

#[test]
fn test_set_on_existing_record() {
    let resolver = resolver();
    let mut record = ErrorRecord::new("ERROR_X", "x").with_arg("keep", 1);
    assert!(resolver.set(&mut record, inputs!["ERROR_Y"]));
    // Unregistered code: message and args survive
    assert_eq!(record.code, "ERROR_Y");
    assert_eq!(record.msg, "x");
    assert_eq!(record.arg("keep"), Some(&json!(1)));
}

// =============================================================================
// Code Invariant
// =============================================================================

#[test]
fn test_empty_code_inputs_yield_generic_code() {
    let resolver = resolver();

    let record = resolver.construct(inputs![""]);
    assert_eq!(record.code, ERROR_GENERIC);
    assert_eq!(record.msg, "An error has occurred");

    let record = resolver.construct(inputs![ErrorRecord::new("", "from record")]);
    assert_eq!(record.code, ERROR_GENERIC);
    assert_eq!(record.msg, "from record");

    let record = resolver.construct(inputs![error_trace::Message::new("", "from pair")]);
    assert_eq!(record.code, ERROR_GENERIC);
    assert_eq!(record.msg, "from pair");
}

// =============================================================================
// Tail Inputs
// =============================================================================

#[test]
fn test_tail_error_overrides_message() {
    let error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let record = resolver().construct(vec![
        Input::from("ERROR_X"),
        Input::from("first"),
        Input::from_error(&error),
    ]);
    assert_eq!(record.code, "ERROR_X");
    assert_eq!(record.msg, error.to_string());
}

#[test]
fn test_later_text_wins_over_tail_error() {
    let error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let record = resolver().construct(vec![
        Input::from("ERROR_X"),
        Input::from_error(&error),
        Input::from("final message"),
    ]);
    assert_eq!(record.msg, "final message");
}
