//! Struct, interface and dict validation.

use crate::error::ValidationError;
use crate::path::Path;
use crate::result::ValidationResult;
use crate::types::{Props, Type};
use crate::validation::Recursor;
use crate::value::{Instance, Value};

/// Validates the declared fields of an object and builds an instance of `ty`.
///
/// Instances of `ty` pass unchanged. Otherwise each declared field is read
/// (or defaulted when absent) and validated in declaration order; in strict
/// mode every undeclared field is an error. The result is an instance of
/// `ty` when there are no errors, and a plain object otherwise.
pub fn structure(
    value: &Value,
    ty: &Type,
    props: &Props,
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    if !value.is_object() {
        return r.fail(value, ty, path);
    }
    if value.as_instance().is_some_and(|i| i.is_instance_of(ty)) {
        return ValidationResult::valid(value.clone());
    }

    let (fields, mut errors) = validate_props(value, props, path, r);
    if r.strict().unwrap_or(props.strict()) {
        errors.extend(undeclared(value, props, path, r, false));
    }

    if errors.is_empty() {
        ValidationResult::valid(Value::Instance(Instance::new(ty.clone(), fields)))
    } else {
        ValidationResult::new(Value::Object(fields), errors)
    }
}

/// Like [`structure`], but the result stays a plain object and, in strict
/// mode, undeclared fields holding nil are tolerated.
pub fn interface(
    value: &Value,
    ty: &Type,
    props: &Props,
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    if !value.is_object() {
        return r.fail(value, ty, path);
    }

    let (fields, mut errors) = validate_props(value, props, path, r);
    if r.strict().unwrap_or(props.strict()) {
        errors.extend(undeclared(value, props, path, r, true));
    }
    ValidationResult::new(Value::Object(fields), errors)
}

/// Validates every key against `domain` and every value against `codomain`.
///
/// A key and its value share the same path, so a bad key and a bad value
/// produce two errors at one path.
pub fn dict(
    value: &Value,
    ty: &Type,
    domain: &Type,
    codomain: &Type,
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    let entries: Vec<_> = match value.as_object() {
        Some(fields) => fields.iter().collect(),
        None => return r.fail(value, ty, path),
    };

    let results = r.map_indexed(entries.len(), |index| {
        let (key, item) = entries[index];
        let entry_path = path.push_field(key.as_str());
        let key_result = r.recurse(&Value::String(key.clone()), domain, &entry_path);
        let mut item_result = r.recurse(item, codomain, &entry_path);

        let mut errors = key_result.errors;
        errors.append(&mut item_result.errors);
        let entry = ValidationResult::new(item_result.value, errors);
        (key.clone(), entry)
    });

    let (fields, errors) = ValidationResult::from_fields(results);
    ValidationResult::new(Value::Object(fields), errors)
}

fn validate_props(
    value: &Value,
    props: &Props,
    path: &Path,
    r: &Recursor<'_>,
) -> (crate::value::Map, Vec<ValidationError>) {
    let declared: Vec<_> = props.props().iter().collect();

    let results = r.map_indexed(declared.len(), |index| {
        let (name, prop) = declared[index];
        let mut actual = value.get(name);
        if actual.is_undefined() {
            if let Some(default) = props.default_for(name) {
                actual = default;
            }
        }
        let field_path = path.push_field(name.as_str());
        (name.clone(), r.recurse(actual, prop, &field_path))
    });

    ValidationResult::from_fields(results)
}

fn undeclared(
    value: &Value,
    props: &Props,
    path: &Path,
    r: &Recursor<'_>,
    tolerate_nil: bool,
) -> Vec<ValidationError> {
    let nil = Type::nil();
    value
        .as_object()
        .into_iter()
        .flatten()
        .filter(|(name, field)| {
            !props.declares(name) && !(tolerate_nil && field.is_nil())
        })
        .map(|(name, field)| {
            r.error(field, &nil, &path.push_field(name.as_str()))
        })
        .collect()
}
