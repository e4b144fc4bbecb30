//! Entry point tests: decoding, fatal schema errors, callbacks and
//! concurrent use of one validator.

use std::collections::HashMap;
use std::thread;

use serde_json::json;

use crate::common::fixtures::{component, petstore, petstore_document};
use crate::{assert_valid, assert_violation};

use openapi_payload_validator::{
    ComponentTable, ContextKind, SchemaError, ValidationContext, ValidationError, Validator,
    ValidatorConfig,
};

#[test]
fn test_undecodable_document() {
    let components = ComponentTable::new();
    let validator = Validator::new(&components);
    let mut context = ValidationContext::request();

    let report = validator
        .validate("{not json", &json!({"type": "object"}), "body", &mut context)
        .expect("decode failures are not schema errors");

    assert_violation!(report, ValidationError::Decode { .. });
    assert_eq!(report.errors.len(), 1);
    assert!(report.messages()[0].starts_with("body: unable to decode JSON document"));
}

#[test]
fn test_root_path_prefixes_messages() {
    let components = petstore();
    let validator = Validator::new(&components);
    let mut context = ValidationContext::request();

    let report = validator
        .validate(
            r#"{"name": "", "password": "p"}"#,
            &component("User"),
            "body",
            &mut context,
        )
        .expect("schema should resolve");

    assert_eq!(
        report.messages(),
        vec!["body[name]: string length 0 is less than minLength 1"]
    );
}

#[test]
fn test_dangling_reference_is_fatal() {
    let components = petstore();
    let validator = Validator::new(&components);
    let mut context = ValidationContext::request();

    let result = validator.validate(
        r#"{"name": "x"}"#,
        &component("Missing"),
        "body",
        &mut context,
    );

    assert_eq!(
        result,
        Err(SchemaError::UnresolvedReference {
            reference: "#/components/schemas/Missing".to_string()
        })
    );
}

#[test]
fn test_reference_cycle_is_fatal() {
    let components = ComponentTable::new()
        .with_schema("A", component("B"))
        .with_schema("B", component("A"));
    let validator = Validator::new(&components);
    let mut context = ValidationContext::request();

    let result = validator.validate_value(&json!({}), &component("A"), "$", &mut context);
    assert!(matches!(result, Err(SchemaError::ReferenceChainTooLong { .. })));
}

#[test]
fn test_recursive_schema_within_depth_limit() {
    let components = petstore();
    let validator = Validator::new(&components);
    let mut context = ValidationContext::request();

    let tree = json!({"label": "a", "child": {"label": "b", "child": {"label": 3}}});
    let report = validator
        .validate_value(&tree, &component("Node"), "$", &mut context)
        .expect("schema should resolve");

    assert_eq!(
        report.messages(),
        vec!["$[child][child][label]: expected string, got number"]
    );
}

#[test]
fn test_depth_limit_aborts_validation() {
    let components = petstore();
    let validator =
        Validator::with_config(&components, ValidatorConfig::default().with_max_depth(3));
    let mut context = ValidationContext::request();

    let tree = json!({"child": {"child": {"child": {"child": {}}}}});
    let result = validator.validate_value(&tree, &component("Node"), "$", &mut context);

    assert!(matches!(
        result,
        Err(SchemaError::DepthExceeded { limit: 3, .. })
    ));
}

#[test]
fn test_into_parts() {
    let components = petstore();
    let validator = Validator::new(&components);
    let mut context = ValidationContext::response();

    let (valid, messages) = validator
        .validate(r#"{"name": "Ann"}"#, &component("User"), "body", &mut context)
        .expect("schema should resolve")
        .into_parts();

    assert!(!valid);
    assert_eq!(messages, vec!["body: required property 'id' is missing"]);
}

#[test]
fn test_components_from_bare_map() {
    let components = ComponentTable::from_document(&json!({
        "Tag": {"type": "string", "minLength": 1}
    }))
    .expect("bare map is accepted");

    assert_eq!(components.len(), 1);
    assert!(components.get("#/components/schemas/Tag").is_some());
    assert!(ComponentTable::from_document(&json!([1, 2])).is_err());
}

#[test]
fn test_callback_url_is_registered() {
    let components = petstore();
    let validator = Validator::new(&components);
    let callback_schema = json!({"type": "object", "properties": {"event": {"type": "string"}}});

    let mut spec = HashMap::new();
    spec.insert(
        "{$request.body#/subscription/callbackUrl}".to_string(),
        callback_schema.clone(),
    );
    let mut context = ValidationContext::request().with_callback_spec(spec);

    let schema = json!({
        "type": "object",
        "properties": {
            "subscription": {
                "type": "object",
                "properties": {"callbackUrl": {"type": "string"}}
            },
            "note": {"type": "string"}
        }
    });
    let report = validator
        .validate(
            r#"{"subscription": {"callbackUrl": "https://client.example/hook"}, "note": "hi"}"#,
            &schema,
            "body",
            &mut context,
        )
        .expect("schema should resolve");

    assert_valid!(report);
    assert_eq!(context.callback_map().len(), 1);
    let callbacks = context.into_callback_map();
    assert_eq!(
        callbacks.get("https://client.example/hook"),
        Some(&callback_schema)
    );
}

#[test]
fn test_callback_registered_inside_combinator_branch() {
    let components = ComponentTable::new();
    let validator = Validator::new(&components);

    let mut spec = HashMap::new();
    spec.insert("{$request.body#/hook}".to_string(), json!({"type": "object"}));
    let mut context = ValidationContext::new(ContextKind::Request).with_callback_spec(spec);

    let schema = json!({
        "oneOf": [{"type": "object", "properties": {"hook": {"type": "string"}}}]
    });
    let report = validator
        .validate_value(
            &json!({"hook": "https://client.example/cb"}),
            &schema,
            "body",
            &mut context,
        )
        .expect("schema should resolve");

    assert_valid!(report);
    assert!(context.callback_map().contains_key("https://client.example/cb"));
}

#[test]
fn test_validator_shared_across_threads() {
    let components = ComponentTable::from_document(&petstore_document())
        .expect("petstore document is valid");
    let validator = Validator::new(&components);
    let schema = component("Pet");

    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let validator = &validator;
                let schema = &schema;
                s.spawn(move || {
                    let document = if i % 2 == 0 {
                        json!({"petType": "dog", "bark": true})
                    } else {
                        json!({"petType": "cat", "meow": "loud"})
                    };
                    let mut context = ValidationContext::request();
                    validator
                        .validate_value(&document, schema, "$", &mut context)
                        .expect("schema should resolve")
                        .is_valid()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let valid = handle.join().expect("worker should not panic");
            assert_eq!(valid, i % 2 == 0);
        }
    });
}
