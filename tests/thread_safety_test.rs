//! Tests for concurrent use of a shared registry and parallel traversal.

use serde_json::json;
use std::sync::Arc;
use std::thread;
use tyval::{Options, Type, TypeRegistry, Value};

fn user() -> Type {
    Type::interface()
        .named("User")
        .field("id", Type::reference("UserId"))
        .field("name", Type::string())
        .build()
}

#[test]
fn test_concurrent_validation() {
    let registry = Arc::new(TypeRegistry::new());
    registry.define("UserId", Type::integer()).unwrap();
    registry.define("User", user()).unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let value = Value::from(json!({"id": i + 1, "name": format!("User{}", i)}));
                let result = registry.validate_named("User", &value, Options::default()).unwrap();
                assert!(result.is_valid());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_registration_and_lookup() {
    let registry = TypeRegistry::new();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                registry.define(format!("Type{}", i), Type::string()).unwrap();
                assert!(registry.get(&format!("Type{}", i)).is_some());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    let all_defined = (0..10).all(|i| registry.get(&format!("Type{}", i)).is_some());
    assert!(all_defined);
}

#[test]
fn test_descriptors_shared_across_threads() {
    let ty = Arc::new(Type::list(Type::number()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ty = Arc::clone(&ty);
            thread::spawn(move || {
                let value = Value::from(json!([1, "x", i]));
                tyval::validate(&value, &ty, Options::default()).errors.len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let registry = TypeRegistry::new();
    registry.define("UserId", Type::integer()).unwrap();

    let users: Vec<_> = (0..200)
        .map(|i| {
            if i % 7 == 0 {
                json!({"id": format!("u{}", i), "name": i})
            } else {
                json!({"id": i, "name": format!("User{}", i)})
            }
        })
        .collect();
    let value = Value::from(serde_json::Value::Array(users));
    let ty = Type::list(user());

    let sequential = registry.validate(&value, &ty, Options::default());
    let parallel = registry.validate(&value, &ty, Options::new().parallel(true));

    assert_eq!(sequential.errors.len(), 2 * 29);
    assert_eq!(parallel, sequential);
}
