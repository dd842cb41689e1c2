//! Validation error types.
//!
//! This module provides [`ValidationError`] for single failures and
//! [`ValidationErrors`] for accumulating several of them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::Path;
use crate::types::Type;
use crate::value::Value;

/// A single validation failure.
///
/// Created once per failing leaf check and never modified afterwards; the
/// fields are only reachable through accessors.
///
/// # Example
///
/// ```rust
/// use tyval::{Path, Type, ValidationError, Value};
///
/// let error = ValidationError::of(
///     &Value::from(1),
///     &Type::string(),
///     &Path::root().push_field("name"),
///     &Value::Undefined,
/// );
///
/// assert_eq!(error.message(), "Invalid value 1 supplied to /name: String");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    actual: Value,
    expected: Type,
    path: Path,
}

impl ValidationError {
    /// Builds the error for `actual` failing `expected` at `path`.
    ///
    /// The message comes from the descriptor's custom formatter when it has
    /// one and the formatter produces a message; otherwise the default
    /// `Invalid value <actual> supplied to <path>: <type>` form is used.
    pub fn of(actual: &Value, expected: &Type, path: &Path, context: &Value) -> Self {
        let message = expected
            .message_fn()
            .and_then(|format| format(actual, path, context))
            .unwrap_or_else(|| default_message(actual, expected, path));

        Self {
            message,
            actual: actual.clone(),
            expected: expected.clone(),
            path: path.clone(),
        }
    }

    /// The rendered message, custom or default.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The value that failed.
    pub fn actual(&self) -> &Value {
        &self.actual
    }

    /// The descriptor the value failed against.
    pub fn expected(&self) -> &Type {
        &self.expected
    }

    /// Where in the input the value failed.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn default_message(actual: &Value, expected: &Type, path: &Path) -> String {
    let to = if path.is_root() {
        expected.name()
    } else {
        format!("{}: {}", path, expected.name())
    };
    format!("Invalid value {} supplied to {}", actual, to)
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty collection of validation errors.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationError>` so that a
/// failed `Validation<Value, ValidationErrors>` always carries at least one
/// error. It implements `Semigroup`, so collections combine in order:
///
/// ```rust
/// use tyval::{Path, Type, ValidationError, ValidationErrors, Value};
/// use stillwater::prelude::*;
///
/// let first = ValidationErrors::single(ValidationError::of(
///     &Value::Null, &Type::string(), &Path::from_field("name"), &Value::Undefined,
/// ));
/// let second = ValidationErrors::single(ValidationError::of(
///     &Value::Null, &Type::number(), &Path::from_field("age"), &Value::Undefined,
/// ));
///
/// assert_eq!(first.combine(second).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Wraps an existing non-empty collection.
    pub fn from_non_empty(errors: NonEmptyVec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Returns `None` when `errors` is empty.
    pub fn try_from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// The number of errors, never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the errors in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns all errors reported at `path`.
    pub fn at_path(&self, path: &Path) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.path() == path).collect()
    }

    /// Returns all errors whose expected descriptor is `ty`.
    pub fn expecting(&self, ty: &Type) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.expected().ptr_eq(ty)).collect()
    }

    /// The first error in traversal order.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Converts into a plain vector, keeping the order.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
