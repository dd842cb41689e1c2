//! Union, intersection, refinement, optional and reference validation.

use crate::path::Path;
use crate::result::ValidationResult;
use crate::types::{DispatchFn, Predicate, Type};
use crate::validation::Recursor;
use crate::value::Value;

/// Validates against the member chosen by dispatch.
///
/// Without an explicit dispatch function the first member whose membership
/// test holds is chosen. The path is extended by the chosen member's index.
/// When no member is chosen the union itself fails at `path`.
pub fn union(
    value: &Value,
    ty: &Type,
    types: &[Type],
    dispatch: Option<&DispatchFn>,
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    let chosen = match dispatch {
        Some(dispatch) => dispatch(value),
        None => types.iter().position(|member| r.is(value, member)),
    };

    match chosen.and_then(|index| types.get(index).map(|member| (index, member))) {
        Some((index, member)) => r.recurse(value, member, &path.push_index(index)),
        None => r.fail(value, ty, path),
    }
}

/// Validates the same value against every member at the same path.
///
/// More than one struct member cannot be merged into a single instance, so
/// that case adds one error against the intersection itself. The value is
/// passed through untouched.
pub fn intersection(
    value: &Value,
    ty: &Type,
    types: &[Type],
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    let mut errors: Vec<_> = types
        .iter()
        .flat_map(|member| r.recurse(value, member, path).errors)
        .collect();

    if types.iter().filter(|member| member.is_struct()).count() > 1 {
        errors.push(r.error(value, ty, path));
    }
    ValidationResult::new(value.clone(), errors)
}

/// Validates against `inner`, then checks the predicate on the result.
///
/// Inner errors are returned as they are and the predicate is skipped. A
/// failing predicate replaces them with one error against the refinement at
/// the unextended path.
pub fn subtype(
    value: &Value,
    ty: &Type,
    inner: &Type,
    predicate: &Predicate,
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    let result = r.recurse(value, inner, path);
    if !result.is_valid() || predicate(&result.value, r.context()) {
        return result;
    }
    ValidationResult::invalid(result.value, r.error(value, ty, path))
}

/// Nil passes as it is; anything else is validated against `inner` at the same path.
pub fn maybe(value: &Value, inner: &Type, path: &Path, r: &Recursor<'_>) -> ValidationResult {
    if value.is_nil() {
        ValidationResult::valid(value.clone())
    } else {
        r.recurse(value, inner, path)
    }
}

/// Resolves a named type and validates against it at the same path.
pub fn reference(
    value: &Value,
    ty: &Type,
    name: &str,
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    let deeper = match r.follow() {
        Some(deeper) => deeper,
        None => {
            tracing::warn!(
                name,
                max_depth = r.max_depth(),
                path = %path,
                "reference depth exceeded"
            );
            return r.fail(value, ty, path);
        }
    };

    match r.resolve(name) {
        Some(resolved) => deeper.recurse(value, &resolved, path),
        None => {
            tracing::warn!(name, path = %path, "unresolved type reference");
            r.fail(value, ty, path)
        }
    }
}
