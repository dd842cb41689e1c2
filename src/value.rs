//! Dynamic runtime values.
//!
//! This module provides [`Value`], the untyped data that descriptors validate,
//! and [`Instance`], an object tagged with the struct or class descriptor that
//! produced it. `Value` keeps the absent marker ([`Value::Undefined`]) apart
//! from an explicit `Null`; both count as nil.

use std::fmt::{self, Debug, Display};

use indexmap::IndexMap;
use serde_json::Number;

use crate::types::Type;

/// Ordered field map used by objects and instances.
pub type Map = IndexMap<String, Value>;

static UNDEFINED: Value = Value::Undefined;

/// A dynamic value.
///
/// # Example
///
/// ```rust
/// use tyval::Value;
/// use serde_json::json;
///
/// let value = Value::from(json!({"name": "Al", "tags": ["a", "b"]}));
/// assert_eq!(value.get("name").as_str(), Some("Al"));
/// assert!(value.get("missing").is_undefined());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value at all (a missing field, a tuple slot past the end).
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    /// An object constructed by a struct or class descriptor.
    Instance(Instance),
}

impl Value {
    /// Builds an object value from key/value pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns true for `Undefined` and `Null`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Returns true for a missing value.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns true for an explicit null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for arrays.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true for object-shaped values: plain objects and instances.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Instance(_))
    }

    /// Returns the string slice of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag of a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number of a numeric value.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns a numeric value as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Returns the items of an array.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields of an object-shaped value.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(fields) => Some(fields),
            Value::Instance(instance) => Some(instance.fields()),
            _ => None,
        }
    }

    /// Returns the instance, for values built by a struct or class descriptor.
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Reads a field, yielding `Undefined` when the value is not object-shaped
    /// or the field is absent.
    pub fn get(&self, key: &str) -> &Value {
        self.as_object()
            .and_then(|fields| fields.get(key))
            .unwrap_or(&UNDEFINED)
    }

    /// Reads an array slot, yielding `Undefined` past the end.
    pub fn get_index(&self, index: usize) -> &Value {
        self.as_array()
            .and_then(|items| items.get(index))
            .unwrap_or(&UNDEFINED)
    }

    /// Converts to JSON. `Undefined` has no JSON form: it yields `None` at the
    /// top level, is dropped from objects and becomes `null` inside arrays.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        let json = match self {
            Value::Undefined => return None,
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(serde_json::Value::Null))
                    .collect(),
            ),
            Value::Object(fields) => fields_to_json(fields),
            Value::Instance(instance) => fields_to_json(instance.fields()),
        };
        Some(json)
    }
}

fn fields_to_json(fields: &Map) -> serde_json::Value {
    serde_json::Value::Object(
        fields
            .iter()
            .filter_map(|(k, v)| v.to_json().map(|json| (k.clone(), json)))
            .collect(),
    )
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Some(json) => write!(f, "{}", json),
            None => write!(f, "undefined"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

/// Non-finite floats have no JSON number form and become `Null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(fields: Map) -> Self {
        Value::Object(fields)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

/// An object-shaped value built by a struct or class descriptor.
///
/// Membership of an instance is by descriptor identity, so two distinct
/// descriptors with the same name never accept each other's instances.
#[derive(Clone, PartialEq)]
pub struct Instance {
    class: Type,
    fields: Map,
}

impl Instance {
    /// Creates an instance of `class` holding `fields`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tyval::{validate, Instance, Map, Options, Type, Value};
    ///
    /// let point = Type::structure().field("x", Type::number()).build();
    /// let fields = Map::from_iter([("x".to_string(), Value::from(1))]);
    /// let existing = Value::Instance(Instance::new(point.clone(), fields));
    ///
    /// let result = validate(&existing, &point, Options::default());
    /// assert_eq!(result.value, existing);
    /// ```
    pub fn new(class: Type, fields: Map) -> Self {
        Self { class, fields }
    }

    /// The descriptor that constructed this instance.
    pub fn class(&self) -> &Type {
        &self.class
    }

    /// The instance's fields in insertion order.
    pub fn fields(&self) -> &Map {
        &self.fields
    }

    /// Unwraps the instance into its fields.
    pub fn into_fields(self) -> Map {
        self.fields
    }

    /// Returns true if `ty` is the descriptor that built this instance.
    pub fn is_instance_of(&self, ty: &Type) -> bool {
        self.class.ptr_eq(ty)
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .field("fields", &self.fields)
            .finish()
    }
}
