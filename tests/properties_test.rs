//! Property tests over arbitrary JSON-shaped values.

use proptest::prelude::*;
use serde_json::Value as Json;
use tyval::{validate, Options, Path, Type, Value};

/// JSON values without floats, nested a few levels deep.
fn json_value() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        "[a-zA-Z0-9_ ]{0,20}".prop_map(Json::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Json::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|m| Json::Object(m.into_iter().collect())),
        ]
    })
}

fn irreducibles() -> Vec<Type> {
    vec![
        Type::any(),
        Type::nil(),
        Type::string(),
        Type::number(),
        Type::integer(),
        Type::boolean(),
        Type::object(),
        Type::array(),
    ]
}

proptest! {
    /// An irreducible validates exactly the values its membership test accepts.
    #[test]
    fn irreducible_validity_matches_membership(json in json_value()) {
        let value = Value::from(json);
        for ty in irreducibles() {
            let result = validate(&value, &ty, Options::default());
            prop_assert_eq!(result.is_valid(), ty.is(&value));
            prop_assert_eq!(&result.value, &value);
            if !result.is_valid() {
                prop_assert_eq!(result.errors.len(), 1);
                prop_assert!(result.errors[0].path().is_root());
            }
        }
    }

    /// A list reports one error per bad item and keeps the input's length.
    #[test]
    fn list_errors_match_bad_items(items in prop::collection::vec(json_value(), 0..20)) {
        let bad: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_number())
            .map(|(i, _)| i)
            .collect();
        let value = Value::from(Json::Array(items));
        let result = validate(&value, &Type::list(Type::number()), Options::default());

        let paths: Vec<Path> = result.errors.iter().map(|e| e.path().clone()).collect();
        let expected: Vec<Path> = bad.into_iter().map(Path::from_index).collect();
        prop_assert_eq!(paths, expected);
        let output_len = result.value.as_array().map(Vec::len);
        prop_assert_eq!(output_len, value.as_array().map(Vec::len));
    }

    /// Parallel traversal produces the same result as sequential traversal.
    #[test]
    fn parallel_matches_sequential(json in json_value()) {
        let value = Value::from(json);
        let ty = Type::list(Type::union(vec![
            Type::string(),
            Type::interface().field("a", Type::maybe(Type::integer())).build(),
        ]));

        let sequential = validate(&value, &ty, Options::default());
        let parallel = validate(&value, &ty, Options::new().parallel(true));
        prop_assert_eq!(parallel, sequential);
    }

    /// A union with no matching member fails once, at the union's own path.
    #[test]
    fn union_without_match_fails_once(json in json_value()) {
        let value = Value::from(json);
        let ty = Type::union(vec![Type::string(), Type::number()]);
        let result = validate(&value, &ty, Options::new().with_path(Path::from_field("u")));

        if ty.is(&value) {
            prop_assert!(result.is_valid());
        } else {
            prop_assert_eq!(result.errors.len(), 1);
            prop_assert_eq!(result.errors[0].path(), &Path::from_field("u"));
            prop_assert!(result.errors[0].expected().ptr_eq(&ty));
        }
    }

    /// Intersecting two structs can never succeed.
    #[test]
    fn intersection_of_structs_always_fails(json in json_value()) {
        let a = Type::structure().field("a", Type::any()).build();
        let b = Type::structure().field("b", Type::any()).build();
        let ty = Type::intersection(vec![a, b]);

        let result = validate(&Value::from(json), &ty, Options::default());
        prop_assert!(!result.is_valid());
        prop_assert!(result.errors.iter().any(|e| e.expected().ptr_eq(&ty)));
    }

    /// Validating a valid result again yields the same value with no errors.
    #[test]
    fn revalidating_valid_output_is_stable(json in json_value()) {
        let value = Value::from(json);
        let ty = Type::dict(Type::string(), Type::maybe(Type::list(Type::any())));

        let first = validate(&value, &ty, Options::default());
        if first.is_valid() {
            let second = validate(&first.value, &ty, Options::default());
            prop_assert!(second.is_valid());
            prop_assert_eq!(second.value, first.value);
        }
    }

    /// A refinement's predicate only adds an error when the inner type passed.
    #[test]
    fn refinement_adds_at_most_one_error(json in json_value()) {
        let value = Value::from(json);
        let short = Type::refinement(Type::string(), |v, _| {
            v.as_str().is_some_and(|s| s.len() < 5)
        });

        let result = validate(&value, &short, Options::default());
        prop_assert_eq!(result.is_valid(), short.is(&value));
        prop_assert!(result.errors.len() <= 1);
        if let Some(error) = result.first_error() {
            let expected = if Type::string().is(&value) {
                short.clone()
            } else {
                Type::string()
            };
            prop_assert!(error.expected().ptr_eq(&expected));
        }
    }
}
