//! The outcome of validating a value.

use std::fmt::{self, Display};

use stillwater::Validation;

use crate::error::{ValidationError, ValidationErrors};
use crate::value::{Map, Value};

/// Errors found while validating a value, together with the resulting value.
///
/// `errors` is empty exactly when the value is valid. On success `value` is
/// the rebuilt value (defaults applied, nested values normalized, structs
/// turned into instances); where a check failed before anything could be
/// rebuilt, it is the input itself.
///
/// # Example
///
/// ```rust
/// use tyval::{validate, Options, Type, Value};
///
/// let result = validate(&Value::from("hi"), &Type::number(), Options::default());
/// assert!(!result.is_valid());
/// assert_eq!(
///     result.to_string(),
///     r#"[ValidationResult, false, (Invalid value "hi" supplied to Number)]"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub value: Value,
}

impl ValidationResult {
    /// Creates a result from an output value and its errors.
    pub fn new(value: Value, errors: Vec<ValidationError>) -> Self {
        Self { errors, value }
    }

    /// A result with no errors.
    pub fn valid(value: Value) -> Self {
        Self::new(value, Vec::new())
    }

    /// A result with a single error.
    pub fn invalid(value: Value, error: ValidationError) -> Self {
        Self::new(value, vec![error])
    }

    /// Assembles sibling results into an array, keeping their order.
    pub fn from_items(items: Vec<ValidationResult>) -> Self {
        let mut errors = Vec::new();
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            errors.extend(item.errors);
            values.push(item.value);
        }
        Self::new(Value::Array(values), errors)
    }

    /// Assembles keyed sibling results into an object, keeping their order.
    pub(crate) fn from_fields(
        fields: Vec<(String, ValidationResult)>,
    ) -> (Map, Vec<ValidationError>) {
        let mut errors = Vec::new();
        let mut values = Map::with_capacity(fields.len());
        for (name, field) in fields {
            errors.extend(field.errors);
            values.insert(name, field.value);
        }
        (values, errors)
    }

    /// Returns true when there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first error in traversal order.
    pub fn first_error(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Converts into a stillwater `Validation`, dropping the value on failure.
    pub fn into_validation(self) -> Validation<Value, ValidationErrors> {
        match ValidationErrors::try_from_vec(self.errors) {
            None => Validation::Success(self.value),
            Some(errors) => Validation::Failure(errors),
        }
    }
}

impl Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "[ValidationResult, true, {}]", self.value)
        } else {
            let messages: Vec<_> = self.errors.iter().map(ValidationError::message).collect();
            write!(f, "[ValidationResult, false, ({})]", messages.join(", "))
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationResult>();
    assert_sync::<ValidationResult>();
};
