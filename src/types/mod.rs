//! Type descriptors.
//!
//! A [`Type`] is a shared, immutable description of an expected value shape.
//! Its [`Kind`] selects the validation strategy and carries only the metadata
//! that kind needs. Descriptors are compared by identity: cloning a `Type`
//! yields the same descriptor, while building one again yields a new one.
//!
//! # Example
//!
//! ```rust
//! use tyval::{validate, Options, Type, Value};
//! use serde_json::json;
//!
//! let person = Type::structure()
//!     .named("Person")
//!     .field("name", Type::string())
//!     .field("age", Type::maybe(Type::number()))
//!     .build();
//!
//! let result = validate(&Value::from(json!({"name": "Al"})), &person, Options::default());
//! assert!(result.is_valid());
//! ```

mod builder;
mod membership;

use std::fmt::{self, Debug};
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

use crate::path::Path;
use crate::value::{Map, Value};

pub use builder::PropsBuilder;
pub(crate) use membership::is_member;

/// Membership test of an irreducible type.
pub type IsFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Refinement predicate, called with the inner-validated value and the
/// caller's context.
pub type Predicate = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Union dispatch: the index of the member a value should be validated against.
pub type DispatchFn = Arc<dyn Fn(&Value) -> Option<usize> + Send + Sync>;

/// Custom error formatter, called with the actual value, the path and the
/// caller's context. Returning `None` falls back to the default message.
pub type MessageFn = Arc<dyn Fn(&Value, &Path, &Value) -> Option<String> + Send + Sync>;

/// Declared fields of a struct or interface.
#[derive(Clone, Default)]
pub struct Props {
    props: IndexMap<String, Type>,
    default_props: Map,
    strict: bool,
}

impl Props {
    /// Declared fields in declaration order.
    pub fn props(&self) -> &IndexMap<String, Type> {
        &self.props
    }

    /// Defaults filled in for missing fields, keyed by field name.
    pub fn default_props(&self) -> &Map {
        &self.default_props
    }

    /// The default for `name`, if one was declared.
    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.default_props.get(name)
    }

    /// Whether undeclared fields are rejected when no per-call override is given.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Whether `name` is a declared field.
    pub fn declares(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }
}

/// The variant tag of a descriptor together with its kind-specific metadata.
#[derive(Clone)]
pub enum Kind {
    Irreducible(IsFn),
    /// Accepted string keys mapped to their display labels.
    Enums(IndexMap<String, String>),
    List(Type),
    Tuple(Vec<Type>),
    Struct(Props),
    Interface(Props),
    Dict { domain: Type, codomain: Type },
    Union {
        types: Vec<Type>,
        dispatch: Option<DispatchFn>,
    },
    Intersection(Vec<Type>),
    Subtype { inner: Type, predicate: Predicate },
    Maybe(Type),
    /// A plain class: membership is instance-of this descriptor.
    Class,
    /// A named type resolved through a [`crate::TypeRegistry`].
    Ref(String),
    /// A host-defined kind, validated by a registered kind validator.
    Custom {
        tag: String,
        types: Vec<Type>,
        meta: Value,
    },
}

impl Kind {
    /// The kind tag used for validator lookup. Plain classes have none.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Kind::Irreducible(_) => Some("irreducible"),
            Kind::Enums(_) => Some("enums"),
            Kind::List(_) => Some("list"),
            Kind::Tuple(_) => Some("tuple"),
            Kind::Struct(_) => Some("struct"),
            Kind::Interface(_) => Some("interface"),
            Kind::Dict { .. } => Some("dict"),
            Kind::Union { .. } => Some("union"),
            Kind::Intersection(_) => Some("intersection"),
            Kind::Subtype { .. } => Some("subtype"),
            Kind::Maybe(_) => Some("maybe"),
            Kind::Class => None,
            Kind::Ref(_) => Some("ref"),
            Kind::Custom { tag, .. } => Some(tag.as_str()),
        }
    }
}

impl Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.tag().unwrap_or("class"))
    }
}

#[derive(Clone)]
struct TypeInner {
    name: Option<String>,
    kind: Kind,
    message: Option<MessageFn>,
}

/// A type descriptor.
#[derive(Clone)]
pub struct Type(Arc<TypeInner>);

impl Type {
    /// Wraps a kind into a new, unnamed descriptor.
    pub fn from_kind(kind: Kind) -> Self {
        Type(Arc::new(TypeInner {
            name: None,
            kind,
            message: None,
        }))
    }

    /// The kind of this descriptor and its metadata.
    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    /// The explicit name given with [`Type::named`], if any.
    pub fn explicit_name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// The display name used in error messages.
    pub fn name(&self) -> String {
        match &self.0.name {
            Some(name) => name.clone(),
            None => self.default_name(),
        }
    }

    /// The custom error formatter, if one was set with [`Type::with_message`].
    pub fn message_fn(&self) -> Option<&MessageFn> {
        self.0.message.as_ref()
    }

    /// Returns true if both handles point at the same descriptor.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns true for struct descriptors, which build instances.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind(), Kind::Struct(_))
    }

    /// Fast membership test. References cannot be resolved here and never match.
    pub fn is(&self, value: &Value) -> bool {
        is_member(value, self, &crate::validation::NoRegistry, 0)
    }

    /// Returns a copy of this descriptor with a display name.
    ///
    /// The copy is a new descriptor: instances of the original are not
    /// instances of the renamed one.
    pub fn named(&self, name: impl Into<String>) -> Self {
        let mut inner = (*self.0).clone();
        inner.name = Some(name.into());
        Type(Arc::new(inner))
    }

    /// Returns a copy of this descriptor with a custom error formatter.
    pub fn with_message<F>(&self, message: F) -> Self
    where
        F: Fn(&Value, &Path, &Value) -> Option<String> + Send + Sync + 'static,
    {
        let mut inner = (*self.0).clone();
        inner.message = Some(Arc::new(message));
        Type(Arc::new(inner))
    }

    /// Collects the names of all references reachable from this descriptor.
    pub fn collect_refs(&self, refs: &mut Vec<String>) {
        match self.kind() {
            Kind::Ref(name) => refs.push(name.clone()),
            Kind::List(inner) | Kind::Maybe(inner) | Kind::Subtype { inner, .. } => {
                inner.collect_refs(refs)
            }
            Kind::Tuple(types)
            | Kind::Intersection(types)
            | Kind::Union { types, .. }
            | Kind::Custom { types, .. } => {
                for ty in types {
                    ty.collect_refs(refs);
                }
            }
            Kind::Struct(props) | Kind::Interface(props) => {
                for ty in props.props().values() {
                    ty.collect_refs(refs);
                }
            }
            Kind::Dict { domain, codomain } => {
                domain.collect_refs(refs);
                codomain.collect_refs(refs);
            }
            Kind::Irreducible(_) | Kind::Enums(_) | Kind::Class => {}
        }
    }

    fn default_name(&self) -> String {
        match self.kind() {
            Kind::Irreducible(_) => "Irreducible".to_string(),
            Kind::Enums(map) => map
                .values()
                .map(|label| format!("{:?}", label))
                .collect::<Vec<_>>()
                .join(" | "),
            Kind::List(inner) => format!("Array<{}>", inner.name()),
            Kind::Tuple(types) => format!("[{}]", join_names(types, ", ")),
            Kind::Struct(props) | Kind::Interface(props) => {
                let fields: Vec<_> = props
                    .props()
                    .iter()
                    .map(|(k, ty)| format!("{}: {}", k, ty.name()))
                    .collect();
                format!("{{{}}}", fields.join(", "))
            }
            Kind::Dict { domain, codomain } => {
                format!("{{[key: {}]: {}}}", domain.name(), codomain.name())
            }
            Kind::Union { types, .. } => join_names(types, " | "),
            Kind::Intersection(types) => join_names(types, " & "),
            Kind::Subtype { inner, .. } => format!("{{{} | predicate}}", inner.name()),
            Kind::Maybe(inner) => format!("?{}", inner.name()),
            Kind::Class => "Class".to_string(),
            Kind::Ref(name) => name.clone(),
            Kind::Custom { tag, .. } => tag.clone(),
        }
    }
}

fn join_names(types: &[Type], sep: &str) -> String {
    types.iter().map(Type::name).collect::<Vec<_>>().join(sep)
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Type").field(&self.name()).finish()
    }
}

// Built-in irreducibles are shared so that `Type::string()` is always the
// same descriptor.
fn builtin(cell: &'static OnceLock<Type>, name: &str, is: fn(&Value) -> bool) -> Type {
    cell.get_or_init(|| Type::irreducible(name, is)).clone()
}

impl Type {
    /// Creates an irreducible type from a name and a membership test.
    pub fn irreducible<F>(name: impl Into<String>, is: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Type::from_kind(Kind::Irreducible(Arc::new(is))).named(name)
    }

    /// Accepts every value, including nil.
    pub fn any() -> Self {
        static CELL: OnceLock<Type> = OnceLock::new();
        builtin(&CELL, "Any", |_| true)
    }

    /// Accepts `Undefined` and `Null`.
    pub fn nil() -> Self {
        static CELL: OnceLock<Type> = OnceLock::new();
        builtin(&CELL, "Nil", Value::is_nil)
    }

    /// Any string.
    pub fn string() -> Self {
        static CELL: OnceLock<Type> = OnceLock::new();
        builtin(&CELL, "String", |v| matches!(v, Value::String(_)))
    }

    /// Any number, integral or not.
    pub fn number() -> Self {
        static CELL: OnceLock<Type> = OnceLock::new();
        builtin(&CELL, "Number", |v| matches!(v, Value::Number(_)))
    }

    /// Numbers without a fractional part.
    pub fn integer() -> Self {
        static CELL: OnceLock<Type> = OnceLock::new();
        builtin(&CELL, "Integer", |v| {
            v.as_number().is_some_and(|n| {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            })
        })
    }

    /// `true` or `false`.
    pub fn boolean() -> Self {
        static CELL: OnceLock<Type> = OnceLock::new();
        builtin(&CELL, "Boolean", |v| matches!(v, Value::Bool(_)))
    }

    /// Any object-shaped value (plain object or instance).
    pub fn object() -> Self {
        static CELL: OnceLock<Type> = OnceLock::new();
        builtin(&CELL, "Object", Value::is_object)
    }

    /// Any array, whatever its items.
    pub fn array() -> Self {
        static CELL: OnceLock<Type> = OnceLock::new();
        builtin(&CELL, "Array", Value::is_array)
    }

    /// An enumeration of string keys, each labelled by itself.
    pub fn enums<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Type::from_kind(Kind::Enums(
            keys.into_iter()
                .map(|k| {
                    let k = k.into();
                    (k.clone(), k)
                })
                .collect(),
        ))
    }

    /// An enumeration of string keys with display labels.
    ///
    /// Values are matched against the keys. The labels make up the display
    /// name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tyval::{validate, Options, Type, Value};
    ///
    /// let status = Type::enums_with([("A", "Active"), ("S", "Suspended")]);
    /// assert_eq!(status.name(), r#""Active" | "Suspended""#);
    ///
    /// assert!(validate(&Value::from("A"), &status, Options::default()).is_valid());
    /// assert!(!validate(&Value::from("Active"), &status, Options::default()).is_valid());
    /// ```
    pub fn enums_with<I, K, L>(map: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        Type::from_kind(Kind::Enums(
            map.into_iter().map(|(k, l)| (k.into(), l.into())).collect(),
        ))
    }

    /// An array whose items all validate against `element`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use tyval::{validate, Options, Type, Value};
    ///
    /// let tags = Type::list(Type::string());
    /// let input = Value::from(json!(["a", 1]));
    /// let result = validate(&input, &tags, Options::default());
    ///
    /// assert_eq!(result.errors.len(), 1);
    /// assert_eq!(result.errors[0].path().to_string(), "/1");
    /// ```
    pub fn list(element: Type) -> Self {
        Type::from_kind(Kind::List(element))
    }

    /// A fixed-length array with one descriptor per slot.
    ///
    /// Shorter inputs validate their missing slots as `Undefined`. Longer
    /// inputs fail as a whole.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use tyval::{validate, Options, Type, Value};
    ///
    /// let pair = Type::tuple(vec![Type::number(), Type::maybe(Type::string())]);
    ///
    /// let short = Value::from(json!([1]));
    /// assert!(validate(&short, &pair, Options::default()).is_valid());
    /// assert_eq!(pair.name(), "[Number, ?String]");
    /// ```
    pub fn tuple(types: Vec<Type>) -> Self {
        Type::from_kind(Kind::Tuple(types))
    }

    /// An object whose keys validate against `domain` and whose values
    /// validate against `codomain`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tyval::{validate, Options, Type, Value};
    ///
    /// let scores = Type::dict(Type::string(), Type::number());
    /// let input = Value::object([("al", Value::from(3)), ("bo", Value::from("x"))]);
    /// let result = validate(&input, &scores, Options::default());
    ///
    /// assert_eq!(result.errors[0].path().to_string(), "/bo");
    /// ```
    pub fn dict(domain: Type, codomain: Type) -> Self {
        Type::from_kind(Kind::Dict { domain, codomain })
    }

    /// A union dispatching to the first member whose membership test holds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tyval::{validate, Options, Type, Value};
    ///
    /// let id = Type::union(vec![Type::string(), Type::integer()]);
    ///
    /// assert!(validate(&Value::from(7), &id, Options::default()).is_valid());
    /// let result = validate(&Value::Null, &id, Options::default());
    /// assert_eq!(result.errors[0].message(), "Invalid value null supplied to String | Integer");
    /// ```
    pub fn union(types: Vec<Type>) -> Self {
        Type::from_kind(Kind::Union {
            types,
            dispatch: None,
        })
    }

    /// A union with an explicit dispatch function returning a member index.
    pub fn union_with<F>(types: Vec<Type>, dispatch: F) -> Self
    where
        F: Fn(&Value) -> Option<usize> + Send + Sync + 'static,
    {
        Type::from_kind(Kind::Union {
            types,
            dispatch: Some(Arc::new(dispatch)),
        })
    }

    /// A value that validates against every member.
    ///
    /// The input passes through unchanged. At most one member may be a struct.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tyval::{validate, Options, Type, Value};
    ///
    /// let named = Type::interface().field("name", Type::string()).build();
    /// let aged = Type::interface().field("age", Type::number()).build();
    /// let person = Type::intersection(vec![named, aged]);
    ///
    /// let input = Value::object([("name", Value::from("Al"))]);
    /// let result = validate(&input, &person, Options::default());
    /// assert_eq!(result.errors[0].path().to_string(), "/age");
    /// ```
    pub fn intersection(types: Vec<Type>) -> Self {
        Type::from_kind(Kind::Intersection(types))
    }

    /// A refinement of `inner` by a predicate over the value and the context.
    pub fn refinement<F>(inner: Type, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Type::from_kind(Kind::Subtype {
            inner,
            predicate: Arc::new(predicate),
        })
    }

    /// A string refinement accepting values matching `pattern`.
    pub fn matching(pattern: &str) -> Result<Self, regex::Error> {
        let re = regex::Regex::new(pattern)?;
        let name = format!("{{String | /{}/}}", pattern);
        let predicate = move |v: &Value, _: &Value| v.as_str().is_some_and(|s| re.is_match(s));
        Ok(Type::refinement(Type::string(), predicate).named(name))
    }

    /// Accepts nil or a value of `inner`.
    pub fn maybe(inner: Type) -> Self {
        Type::from_kind(Kind::Maybe(inner))
    }

    /// A plain class; build its values with [`crate::Instance::new`].
    pub fn class(name: impl Into<String>) -> Self {
        Type::from_kind(Kind::Class).named(name)
    }

    /// A reference to a type defined in a [`crate::TypeRegistry`].
    pub fn reference(name: impl Into<String>) -> Self {
        Type::from_kind(Kind::Ref(name.into()))
    }

    /// A host-defined kind; see [`crate::TypeRegistry::register_kind`].
    pub fn custom(tag: impl Into<String>, types: Vec<Type>, meta: Value) -> Self {
        Type::from_kind(Kind::Custom {
            tag: tag.into(),
            types,
            meta,
        })
    }

    /// Starts a struct: validated values become instances of the struct.
    pub fn structure() -> PropsBuilder {
        PropsBuilder::new(false)
    }

    /// Starts an interface: validated values stay plain objects.
    pub fn interface() -> PropsBuilder {
        PropsBuilder::new(true)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Type>();
    assert_sync::<Type>();
};
