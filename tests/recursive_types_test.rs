//! Tests for self-referential and mutually recursive named types.

use serde_json::json;
use tyval::{Options, Path, Type, TypeRegistry, Value};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn tree_registry(max_depth: Option<usize>) -> TypeRegistry {
    let registry = match max_depth {
        Some(depth) => TypeRegistry::new().with_max_depth(depth),
        None => TypeRegistry::new(),
    };
    registry
        .define(
            "Node",
            Type::interface()
                .named("Node")
                .field("value", Type::number())
                .field("children", Type::list(Type::reference("Node")))
                .build(),
        )
        .unwrap();
    registry
}

#[test]
fn test_self_referential_tree() {
    let registry = tree_registry(None);
    let tree = v(json!({
        "value": 1,
        "children": [
            {"value": 2, "children": []},
            {"value": 3, "children": [{"value": 4, "children": []}]}
        ]
    }));

    let result = registry.validate_named("Node", &tree, Options::default()).unwrap();
    assert!(result.is_valid());
    assert_eq!(result.value, tree);
}

#[test]
fn test_errors_deep_in_tree_carry_full_path() {
    let registry = tree_registry(None);
    let tree = v(json!({
        "value": 1,
        "children": [
            {"value": 2, "children": []},
            {"value": 3, "children": [{"value": "four", "children": []}]}
        ]
    }));

    let result = registry.validate_named("Node", &tree, Options::default()).unwrap();
    assert_eq!(result.errors.len(), 1);
    let path = result.errors[0].path().to_string();
    assert_eq!(path, "/children/1/children/0/value");
    assert!(result.errors[0].expected().ptr_eq(&Type::number()));
}

#[test]
fn test_mutual_recursion() {
    let registry = TypeRegistry::new();
    registry
        .define(
            "Expr",
            Type::union_with(vec![Type::number(), Type::reference("BinOp")], |value| {
                Some(if value.is_object() { 1 } else { 0 })
            }),
        )
        .unwrap();
    registry
        .define(
            "BinOp",
            Type::interface()
                .field("op", Type::enums(["+", "*"]))
                .field("left", Type::reference("Expr"))
                .field("right", Type::reference("Expr"))
                .build(),
        )
        .unwrap();
    assert!(registry.unresolved_refs().is_empty());

    let expr = v(json!({
        "op": "+",
        "left": 1,
        "right": {"op": "*", "left": 2, "right": 3}
    }));
    assert!(registry
        .validate_named("Expr", &expr, Options::default())
        .unwrap()
        .is_valid());

    // Dispatch picks the operator branch at every level, so the error lands on
    // the innermost field instead of the outermost union.
    let expr = v(json!({
        "op": "+",
        "left": 1,
        "right": {"op": "-", "left": 2, "right": 3}
    }));
    let result = registry.validate_named("Expr", &expr, Options::default()).unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path().to_string(), "/1/right/1/op");
}

#[test]
fn test_max_depth_stops_following_references() {
    let registry = tree_registry(Some(2));
    let shallow = v(json!({
        "value": 1,
        "children": [{"value": 2, "children": []}]
    }));
    assert!(registry
        .validate(&shallow, &Type::reference("Node"), Options::default())
        .is_valid());

    let deep = v(json!({
        "value": 1,
        "children": [{"value": 2, "children": [{"value": 3, "children": []}]}]
    }));
    let result = registry.validate(&deep, &Type::reference("Node"), Options::default());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].path(),
        &Path::from_field("children")
            .push_index(0)
            .push_field("children")
            .push_index(0)
    );
}

#[test]
fn test_zero_max_depth_fails_every_reference() {
    let registry = tree_registry(Some(0));
    let result = registry.validate(
        &v(json!({"value": 1, "children": []})),
        &Type::reference("Node"),
        Options::default(),
    );
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].path().is_root());
}

#[test]
fn test_missing_reference_fails_at_its_path() {
    let registry = TypeRegistry::new();
    let ty = Type::interface()
        .field("owner", Type::reference("User"))
        .build();

    let result = registry.validate(&v(json!({"owner": {}})), &ty, Options::default());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path(), &Path::from_field("owner"));
    assert_eq!(result.errors[0].expected().name(), "User");
    assert_eq!(registry.unresolved_refs(), Vec::<String>::new());
}
