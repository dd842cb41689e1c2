//! List and tuple validation.

use crate::path::Path;
use crate::result::ValidationResult;
use crate::types::Type;
use crate::validation::Recursor;
use crate::value::Value;

/// Validates every item of an array against `element`.
///
/// The resulting array has the input's length and order. A non-array fails
/// as a whole.
pub fn list(
    value: &Value,
    ty: &Type,
    element: &Type,
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    let items = match value.as_array() {
        Some(items) => items,
        None => return r.fail(value, ty, path),
    };

    let results = r.map_indexed(items.len(), |index| {
        r.recurse(&items[index], element, &path.push_index(index))
    });
    ValidationResult::from_items(results)
}

/// Validates each slot of an array against the slot's type.
///
/// Arrays shorter than the tuple are accepted as input: missing slots are
/// validated as `Undefined`. Non-arrays and longer arrays fail as a whole.
pub fn tuple(
    value: &Value,
    ty: &Type,
    types: &[Type],
    path: &Path,
    r: &Recursor<'_>,
) -> ValidationResult {
    match value.as_array() {
        Some(items) if items.len() <= types.len() => {}
        _ => return r.fail(value, ty, path),
    }

    let results = r.map_indexed(types.len(), |index| {
        let slot_path = path.push_index(index);
        r.recurse(value.get_index(index), &types[index], &slot_path)
    });
    ValidationResult::from_items(results)
}
