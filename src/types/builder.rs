//! Builder for struct and interface descriptors.

use std::sync::Arc;

use super::{Kind, MessageFn, Props, Type};
use crate::path::Path;
use crate::value::Value;

/// Builds a struct or interface descriptor field by field.
///
/// # Example
///
/// ```rust
/// use tyval::{validate, Options, Type, Value};
/// use serde_json::json;
///
/// let settings = Type::structure()
///     .named("Settings")
///     .field("theme", Type::string())
///     .default("volume", Type::number(), Value::from(5))
///     .strict(true)
///     .build();
///
/// let result = validate(&Value::from(json!({"theme": "dark"})), &settings, Options::default());
/// assert!(result.is_valid());
/// assert_eq!(result.value.get("volume"), &Value::from(5));
/// ```
pub struct PropsBuilder {
    interface: bool,
    name: Option<String>,
    props: Props,
    message: Option<MessageFn>,
}

impl PropsBuilder {
    pub(super) fn new(interface: bool) -> Self {
        Self {
            interface,
            name: None,
            props: Props::default(),
            message: None,
        }
    }

    /// Sets the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declares a field. Redeclaring a field replaces its type and keeps its position.
    pub fn field(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.props.props.insert(name.into(), ty);
        self
    }

    /// Declares a field together with the value used when the input lacks it.
    pub fn default(mut self, name: impl Into<String>, ty: Type, default: Value) -> Self {
        let name = name.into();
        self.props.props.insert(name.clone(), ty);
        self.props.default_props.insert(name, default);
        self
    }

    /// Rejects undeclared fields unless a per-call option says otherwise.
    pub fn strict(mut self, strict: bool) -> Self {
        self.props.strict = strict;
        self
    }

    /// Sets a custom error formatter for failures of the object itself.
    pub fn with_message<F>(mut self, message: F) -> Self
    where
        F: Fn(&Value, &Path, &Value) -> Option<String> + Send + Sync + 'static,
    {
        self.message = Some(Arc::new(message));
        self
    }

    /// Finishes the builder into a struct or interface descriptor.
    pub fn build(self) -> Type {
        let kind = if self.interface {
            Kind::Interface(self.props)
        } else {
            Kind::Struct(self.props)
        };
        Type(Arc::new(super::TypeInner {
            name: self.name,
            kind,
            message: self.message,
        }))
    }
}
