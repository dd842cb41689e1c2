//! # tyval
//!
//! Recursive structural validation of dynamic values against type
//! descriptors, collecting every error in a single pass.
//!
//! ## Overview
//!
//! A [`Type`] describes a shape: an irreducible (string, number, ...), an
//! enumeration, a list, tuple, struct, interface, dict, union, intersection,
//! refinement, optional, plain class or named reference. [`validate`] walks a
//! [`Value`] and the descriptor together and returns a [`ValidationResult`]:
//! either the rebuilt value (defaults applied, structs turned into instances)
//! or every [`ValidationError`] found, each with the [`Path`] it occurred at.
//!
//! ## Core Types
//!
//! - [`Value`]: the dynamic value being validated
//! - [`Type`] / [`Kind`]: descriptors and their kind-specific metadata
//! - [`Path`]: where in the root value an error occurred (e.g. `/users/0/email`)
//! - [`ValidationError`]: a single failure (message, actual value, expected type, path)
//! - [`ValidationResult`]: the errors plus the resulting value
//! - [`TypeRegistry`]: named types for recursion and kind validators for extension
//!
//! ## Example
//!
//! ```rust
//! use tyval::{validate, Options, Path, Type, Value};
//! use serde_json::json;
//!
//! let person = Type::structure()
//!     .named("Person")
//!     .field("name", Type::string())
//!     .field("age", Type::maybe(Type::number()))
//!     .build();
//!
//! let result = validate(&Value::from(json!({"name": 1})), &person, Options::default());
//! assert_eq!(result.errors.len(), 1);
//! assert_eq!(result.errors[0].path(), &Path::from_field("name"));
//! assert_eq!(
//!     result.errors[0].message(),
//!     "Invalid value 1 supplied to /name: String"
//! );
//! ```

pub mod error;
pub mod kinds;
pub mod path;
pub mod registry;
pub mod result;
pub mod types;
pub mod validation;
pub mod value;

pub use error::{ValidationError, ValidationErrors};
pub use kinds::KindValidator;
pub use path::{Path, PathSegment};
pub use registry::{RegistryError, TypeRegistry};
pub use result::ValidationResult;
pub use types::{Kind, Props, PropsBuilder, Type};
pub use validation::{Options, Recursor, RegistryAccess};
pub use value::{Instance, Map, Value};

use validation::NoRegistry;

/// Validates `value` against `ty` with no named types or kind overrides.
///
/// `options` may be a bare [`Path`] (or a vector of [`PathSegment`]s), which
/// becomes the path of the root value. Use a [`TypeRegistry`] to resolve
/// [`Type::reference`]s or to register kind validators.
pub fn validate(value: &Value, ty: &Type, options: impl Into<Options>) -> ValidationResult {
    let options = options.into();
    let result = Recursor::new(&NoRegistry, &options).recurse(value, ty, options.path());

    tracing::debug!(
        descriptor = %ty.name(),
        errors = result.errors.len(),
        "validated value"
    );
    result
}
