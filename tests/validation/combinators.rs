//! `oneOf`, `anyOf`, `allOf` and discriminator tests.

use serde_json::json;

use crate::common::check;
use crate::common::fixtures::{component, petstore};
use crate::common::validate_with;
use crate::{assert_valid, assert_violation};

use openapi_payload_validator::{
    ContextKind, ErrorEntry, SchemaError, ValidationContext, ValidationError, Validator,
};

#[test]
fn test_discriminator_selects_mapped_branch() {
    let report = validate_with(
        &petstore(),
        &component("Pet"),
        &json!({"petType": "dog", "bark": true}),
        ContextKind::Request,
    );
    assert_valid!(report);
}

#[test]
fn test_discriminator_reports_branch_errors() {
    let report = validate_with(
        &petstore(),
        &component("Pet"),
        &json!({"petType": "dog", "bark": "yes"}),
        ContextKind::Request,
    );

    assert_eq!(
        report.messages(),
        vec![
            "$: value does not match any oneOf schema",
            "discriminator[dog]: ${petType=dog}[bark]: expected boolean, got string",
        ]
    );
    match report.errors.entries() {
        [ErrorEntry::Leaf(ValidationError::NoOneOfMatch { .. }), ErrorEntry::Group { key, errors }] => {
            assert_eq!(key, "discriminator[dog]");
            assert_eq!(errors.len(), 1);
        }
        other => panic!("unexpected entries: {:#?}", other),
    }
}

#[test]
fn test_discriminator_does_not_try_other_branches() {
    // A cat payload tagged as a dog fails even though it satisfies Cat.
    let report = validate_with(
        &petstore(),
        &component("Pet"),
        &json!({"petType": "dog", "meow": true}),
        ContextKind::Request,
    );

    assert_eq!(
        report.messages(),
        vec![
            "$: value does not match any oneOf schema",
            "discriminator[dog]: ${petType=dog}: required property 'bark' is missing",
        ]
    );
}

#[test]
fn test_discriminator_missing_property() {
    let report = validate_with(
        &petstore(),
        &component("Pet"),
        &json!({"bark": true}),
        ContextKind::Request,
    );

    assert_eq!(
        report.messages(),
        vec![
            "$: value does not match any oneOf schema",
            "discriminator[petType]: $: discriminator property 'petType' is missing",
        ]
    );
}

#[test]
fn test_unmapped_discriminator_value_is_fatal() {
    let components = petstore();
    let validator = Validator::new(&components);
    let mut context = ValidationContext::request();

    let result = validator.validate_value(
        &json!({"petType": "bird", "tweet": true}),
        &component("Pet"),
        "$",
        &mut context,
    );

    assert_eq!(
        result,
        Err(SchemaError::UnresolvedReference {
            reference: "bird".to_string()
        })
    );
}

#[test]
fn test_discriminator_falls_back_to_component_name() {
    let components = petstore().with_schema(
        "Shape",
        json!({
            "oneOf": [
                {"$ref": "#/components/schemas/Dog"},
                {"$ref": "#/components/schemas/Cat"}
            ],
            "discriminator": {"propertyName": "petType"}
        }),
    );

    assert_valid!(validate_with(
        &components,
        &component("Shape"),
        &json!({"petType": "Cat", "meow": false}),
        ContextKind::Request
    ));
}

fn inline_mapping_schema() -> serde_json::Value {
    json!({
        "oneOf": [{"type": "object"}],
        "discriminator": {
            "propertyName": "kind",
            "mapping": {
                "a": {"type": "object", "required": ["x"]},
                "1": {"type": "object", "required": ["y"]},
                "dog": {"$ref": "#/components/schemas/Dog"}
            }
        }
    })
}

#[test]
fn test_discriminator_inline_mapping() {
    let schema = inline_mapping_schema();

    assert_valid!(check(&schema, &json!({"kind": "a", "x": 1})));
    assert_eq!(
        check(&schema, &json!({"kind": "a"})).messages(),
        vec![
            "$: value does not match any oneOf schema",
            "discriminator[a]: ${kind=a}: required property 'x' is missing",
        ]
    );
}

#[test]
fn test_discriminator_inline_mapping_follows_reference() {
    let components = petstore();
    let schema = inline_mapping_schema();

    assert_valid!(validate_with(
        &components,
        &schema,
        &json!({"kind": "dog", "petType": "dog", "bark": true}),
        ContextKind::Request
    ));
    assert_violation!(
        validate_with(
            &components,
            &schema,
            &json!({"kind": "dog", "petType": "dog"}),
            ContextKind::Request
        ),
        ValidationError::MissingRequiredProperty { property, .. } if property == "bark"
    );
}

#[test]
fn test_discriminator_non_string_value() {
    let schema = inline_mapping_schema();

    assert_valid!(check(&schema, &json!({"kind": 1, "y": true})));
    assert_eq!(
        check(&schema, &json!({"kind": 1})).messages(),
        vec![
            "$: value does not match any oneOf schema",
            "discriminator[1]: ${kind=1}: required property 'y' is missing",
        ]
    );
}

#[test]
fn test_one_of_branches_inherit_parent_type() {
    let schema = json!({
        "type": "string",
        "oneOf": [{"maxLength": 3}, {"minLength": 5}]
    });

    assert_valid!(check(&schema, &json!("ab")));
    assert_valid!(check(&schema, &json!("abcdef")));

    let report = check(&schema, &json!("abcd"));
    assert_eq!(
        report.messages(),
        vec![
            "$: value does not match any oneOf schema",
            "oneOf[0]: ${sub:0}: string length 4 is greater than maxLength 3",
            "oneOf[1]: ${sub:1}: string length 4 is less than minLength 5",
        ]
    );
}

#[test]
fn test_untyped_branch_defaults_to_object() {
    let schema = json!({"oneOf": [{"required": ["a"]}]});

    assert_valid!(check(&schema, &json!({"a": 1})));
    assert_eq!(
        check(&schema, &json!("a")).messages(),
        vec![
            "$: value does not match any oneOf schema",
            "oneOf[0]: ${sub:0}: expected object, got string",
        ]
    );
}

#[test]
fn test_one_of_multiple_matches_lists_descriptions() {
    let schema = json!({
        "oneOf": [
            {"type": "object", "description": "Loose"},
            {"type": "object"}
        ]
    });
    let report = check(&schema, &json!({}));

    assert_violation!(report, ValidationError::MultipleOneOfMatches { .. });
    assert_eq!(
        report.messages(),
        vec![r#"$: value matches more than one oneOf schema: ["Loose", "1"]"#]
    );
}

#[test]
fn test_any_of() {
    let schema = json!({"anyOf": [{"type": "string"}, {"type": "integer"}]});

    assert_valid!(check(&schema, &json!("x")));
    assert_valid!(check(&schema, &json!(7)));

    let report = check(&schema, &json!(true));
    assert_eq!(
        report.messages(),
        vec![
            "$: value does not match any anyOf schema",
            "anyOf[0]: ${sub:0}: expected string, got boolean",
            "anyOf[1]: ${sub:1}: expected number, got boolean",
            "anyOf[1]: ${sub:1}: value does not satisfy the integer constraints",
        ]
    );
}

#[test]
fn test_all_of() {
    let schema = json!({
        "allOf": [
            {"type": "object", "required": ["a"]},
            {"type": "object", "required": ["b"]}
        ]
    });

    assert_valid!(check(&schema, &json!({"a": 1, "b": 2})));

    let report = check(&schema, &json!({"a": 1}));
    assert_violation!(report, ValidationError::AllOfMismatch { failed: 1, .. });
    assert_eq!(
        report.messages(),
        vec![
            "$: value does not match 1 of the allOf schemas",
            "allOf[1]: ${sub:1}: required property 'b' is missing",
        ]
    );
}

#[test]
fn test_all_of_with_references() {
    let components = petstore().with_schema(
        "NamedDog",
        json!({
            "allOf": [
                {"$ref": "#/components/schemas/Dog"},
                {"required": ["name"], "properties": {"name": {"type": "string"}}}
            ]
        }),
    );

    assert_valid!(validate_with(
        &components,
        &component("NamedDog"),
        &json!({"petType": "dog", "bark": true, "name": "Rex"}),
        ContextKind::Request
    ));
    assert_violation!(
        validate_with(
            &components,
            &component("NamedDog"),
            &json!({"petType": "dog", "bark": true}),
            ContextKind::Request
        ),
        ValidationError::MissingRequiredProperty { .. }
    );
}

#[test]
fn test_conflicting_combinators() {
    let schema = json!({
        "oneOf": [{"type": "string"}],
        "anyOf": [{"type": "string"}]
    });
    let report = check(&schema, &json!("x"));

    assert_eq!(
        report.messages(),
        vec!["$: schema declares more than one of oneOf, anyOf, allOf"]
    );
}

#[test]
fn test_combinator_must_be_a_list() {
    let schema = json!({"type": "object", "allOf": {"required": ["a"]}});
    let report = check(&schema, &json!({}));

    assert_violation!(report, ValidationError::InvalidCombinator { .. });
    assert_eq!(
        report.messages(),
        vec!["$: 'allOf' must be a list of schemas"]
    );

    for keyword in ["oneOf", "anyOf"] {
        let mut schema = serde_json::Map::new();
        schema.insert(keyword.to_string(), json!({"type": "string"}));
        let schema = serde_json::Value::Object(schema);
        assert_eq!(
            check(&schema, &json!("x")).messages(),
            vec![format!("$: '{}' must be a list of schemas", keyword)]
        );
    }
}

#[test]
fn test_undetermined_type() {
    let report = check(&json!({"description": "anything"}), &json!(1));
    assert_eq!(report.messages(), vec!["$: unable to determine schema type"]);
}

#[test]
fn test_unsupported_type() {
    let report = check(&json!({"type": "file"}), &json!("x"));
    assert_eq!(report.messages(), vec!["$: unsupported schema type 'file'"]);
}
