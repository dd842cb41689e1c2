//! Integration tests for ValidationError, ValidationErrors and result conversion.

use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;
use tyval::{validate, Options, Path, Type, ValidationError, ValidationErrors, Value};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn signup() -> Type {
    Type::interface()
        .named("Signup")
        .field("name", Type::string())
        .field("email", Type::string())
        .field("age", Type::integer())
        .build()
}

#[test]
fn test_error_full_context() {
    let input = v(json!({"name": "Al", "email": 3, "age": 30}));
    let result = validate(&input, &signup(), Options::default());
    let error = result.first_error().unwrap();

    assert_eq!(error.path(), &Path::from_field("email"));
    assert_eq!(error.actual(), &Value::from(3));
    assert!(error.expected().ptr_eq(&Type::string()));
    let expected = "Invalid value 3 supplied to /email: String";
    assert_eq!(error.message(), expected);
    assert_eq!(error.to_string(), error.message());
}

#[test]
fn test_root_error_message_omits_path() {
    let result = validate(&Value::Null, &signup(), Options::default());
    let expected = "Invalid value null supplied to Signup";
    assert_eq!(result.errors[0].message(), expected);
}

#[test]
fn test_custom_formatter_sees_path_and_context() {
    let age = Type::integer().with_message(|actual, path, context| {
        let message = format!("{} at {} is not an age ({})", actual, path, context);
        Some(message)
    });
    let ty = Type::interface().field("age", age).build();

    let options = Options::new().with_context(Value::from("en"));
    let result = validate(&v(json!({"age": "old"})), &ty, options);
    let expected = r#""old" at /age is not an age ("en")"#;
    assert_eq!(result.errors[0].message(), expected);
}

#[test]
fn test_formatter_returning_none_uses_default_message() {
    let ty = Type::string().with_message(|_, _, _| None);
    let result = validate(&Value::from(1), &ty, Options::default());
    let expected = "Invalid value 1 supplied to String";
    assert_eq!(result.errors[0].message(), expected);
}

#[test]
fn test_into_validation_success() {
    let input = v(json!({"name": "Al", "email": "al@x", "age": 30}));
    let result = validate(&input, &signup(), Options::default());

    match result.into_validation() {
        Validation::Success(value) => assert_eq!(value.get("age"), &Value::from(30)),
        Validation::Failure(_) => panic!("Expected success"),
    }
}

#[test]
fn test_into_validation_failure_keeps_order() {
    let input = v(json!({"name": 1, "email": 2, "age": 1.5}));
    let result = validate(&input, &signup(), Options::default());

    match result.into_validation() {
        Validation::Failure(errors) => {
            assert_eq!(errors.len(), 3);
            let paths: Vec<_> = errors.iter().map(|e| e.path().to_string()).collect();
            assert_eq!(paths, vec!["/name", "/email", "/age"]);
            assert_eq!(errors.first().path(), &Path::from_field("name"));
        }
        Validation::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_validation_and_accumulates_errors_across_calls() {
    let billing = validate(
        &v(json!({"name": 1})),
        &signup(),
        Options::new().with_path(Path::from_field("billing")),
    );
    let shipping = validate(
        &v(json!({"email": 1})),
        &signup(),
        Options::new().with_path(Path::from_field("shipping")),
    );

    let combined = billing.into_validation().and(shipping.into_validation());
    match combined {
        Validation::Failure(errors) => {
            let billing_name = Path::from_field("billing").push_field("name");
            let shipping_email = Path::from_field("shipping").push_field("email");
            assert_eq!(errors.at_path(&billing_name).len(), 1);
            assert_eq!(errors.at_path(&shipping_email).len(), 1);
            assert!(errors.len() > 2);
        }
        Validation::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_errors_combine_via_semigroup() {
    let e1 = ValidationErrors::single(ValidationError::of(
        &Value::Null,
        &Type::string(),
        &Path::from_field("name"),
        &Value::Undefined,
    ));
    let e2 = ValidationErrors::single(ValidationError::of(
        &Value::Null,
        &Type::number(),
        &Path::from_field("age"),
        &Value::Undefined,
    ));

    let combined = e1.combine(e2);
    assert_eq!(combined.len(), 2);
    assert!(!combined.is_empty());
    assert_eq!(combined.expecting(&Type::number()).len(), 1);

    let messages: Vec<_> = combined.into_iter().map(|e| e.message().to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Invalid value null supplied to /name: String",
            "Invalid value null supplied to /age: Number",
        ]
    );
}

#[test]
fn test_errors_from_non_empty() {
    let head = ValidationError::of(
        &Value::from(1),
        &Type::string(),
        &Path::from_field("a"),
        &Value::Undefined,
    );
    let tail = ValidationError::of(
        &Value::from(2),
        &Type::string(),
        &Path::from_field("b"),
        &Value::Undefined,
    );

    let errors = ValidationErrors::from_non_empty(NonEmptyVec::new(head, vec![tail]));
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.first().path(), &Path::from_field("a"));

    let paths: Vec<_> = errors.into_vec().iter().map(|e| e.path().to_string()).collect();
    assert_eq!(paths, vec!["/a", "/b"]);
}

#[test]
fn test_errors_display() {
    let ty = Type::list(Type::number());
    let result = validate(&v(json!([1, "a", true])), &ty, Options::default());
    let errors = ValidationErrors::try_from_vec(result.errors).unwrap();

    assert_eq!(
        errors.to_string(),
        "Validation failed with 2 error(s):\n  \
         1. Invalid value \"a\" supplied to /1: Number\n  \
         2. Invalid value true supplied to /2: Number\n"
    );
}

#[test]
fn test_try_from_empty_vec() {
    assert!(ValidationErrors::try_from_vec(Vec::new()).is_none());
}
