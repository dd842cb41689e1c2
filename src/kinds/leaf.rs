//! Leaf checks: irreducibles, enums and plain classes.

use crate::path::Path;
use crate::result::ValidationResult;
use crate::types::Type;
use crate::validation::Recursor;
use crate::value::Value;

/// Passes iff the descriptor's membership test holds. Used for enums too.
pub fn irreducible(value: &Value, ty: &Type, path: &Path, r: &Recursor<'_>) -> ValidationResult {
    if r.is(value, ty) {
        ValidationResult::valid(value.clone())
    } else {
        r.fail(value, ty, path)
    }
}

/// Passes iff `value` is an instance built by this very descriptor.
pub fn instance(value: &Value, ty: &Type, path: &Path, r: &Recursor<'_>) -> ValidationResult {
    match value.as_instance() {
        Some(instance) if instance.is_instance_of(ty) => ValidationResult::valid(value.clone()),
        _ => r.fail(value, ty, path),
    }
}
