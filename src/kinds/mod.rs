//! Validation strategies, one per descriptor kind.
//!
//! Each function validates a value against a descriptor of its kind and
//! calls back into [`Recursor::recurse`] for nested descriptors. They are
//! public so that a registered [`KindValidator`] can wrap a built-in one.
//!
//! Failures of the value's own shape (an array where an object was needed,
//! no union member, ...) yield a single error for that subtree. Nested
//! failures never stop a traversal: every sibling is visited and every error
//! is kept.

mod collections;
mod combinators;
mod leaf;
mod object;

pub use collections::{list, tuple};
pub use combinators::{intersection, maybe, reference, subtype, union};
pub use leaf::{instance, irreducible};
pub use object::{dict, interface, structure};

use crate::path::Path;
use crate::result::ValidationResult;
use crate::types::Type;
use crate::validation::Recursor;
use crate::value::Value;

/// A validation strategy registered for a kind tag.
///
/// Closures with the matching signature implement this trait.
///
/// # Example
///
/// ```rust
/// use tyval::{kinds, Kind, Options, Path, Recursor, Type, TypeRegistry, ValidationResult, Value};
///
/// // Lists must not be empty.
/// fn non_empty_list(value: &Value, ty: &Type, path: &Path, r: &Recursor<'_>) -> ValidationResult {
///     match (ty.kind(), value.as_array()) {
///         (_, Some(items)) if items.is_empty() => r.fail(value, ty, path),
///         (Kind::List(element), _) => kinds::list(value, ty, element, path, r),
///         _ => r.fail(value, ty, path),
///     }
/// }
///
/// let registry = TypeRegistry::new();
/// registry.register_kind("list", non_empty_list).unwrap();
///
/// let tags = Type::list(Type::string());
/// let result = registry.validate(&Value::Array(vec![]), &tags, Options::default());
/// assert!(!result.is_valid());
/// ```
pub trait KindValidator: Send + Sync {
    fn validate(
        &self,
        value: &Value,
        ty: &Type,
        path: &Path,
        recursor: &Recursor<'_>,
    ) -> ValidationResult;
}

impl<F> KindValidator for F
where
    F: Fn(&Value, &Type, &Path, &Recursor<'_>) -> ValidationResult + Send + Sync,
{
    fn validate(
        &self,
        value: &Value,
        ty: &Type,
        path: &Path,
        recursor: &Recursor<'_>,
    ) -> ValidationResult {
        self(value, ty, path, recursor)
    }
}
