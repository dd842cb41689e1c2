//! Per-call options and the recursive dispatcher.
//!
//! This module provides [`Options`], the caller-facing knobs of a single
//! validate call, and [`Recursor`], which carries those options, the registry
//! and the reference depth through the traversal. Every nested validation
//! re-enters [`Recursor::recurse`].

use rayon::prelude::*;

use crate::error::ValidationError;
use crate::kinds;
use crate::path::{Path, PathSegment};
use crate::result::ValidationResult;
use crate::types::{is_member, Kind, Type};
use crate::value::Value;

/// Default limit on the number of references followed in one chain.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 100;

/// Options of a single validate call.
///
/// A bare [`Path`] (or a vector of segments) converts into options whose
/// initial path is that path.
///
/// # Example
///
/// ```rust
/// use tyval::{Options, Path, Value};
///
/// let options = Options::new()
///     .with_path(Path::from_field("body"))
///     .with_strict(true)
///     .with_context(Value::from("request-42"));
///
/// assert_eq!(options.strict(), Some(true));
/// assert_eq!(Options::from(Path::from_field("body")).path(), options.path());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    path: Path,
    strict: Option<bool>,
    context: Value,
    parallel: bool,
}

impl Options {
    /// Creates options with the root path, no strictness override, an
    /// undefined context and sequential traversal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tyval::{validate, Options, Path, Type, Value};
    ///
    /// let options = Options::new().with_path(Path::from_field("age"));
    /// let result = validate(&Value::from("x"), &Type::number(), options);
    ///
    /// assert_eq!(result.errors[0].path().to_string(), "/age");
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path of the root value.
    pub fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Overrides the strictness declared by every struct and interface.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Sets the value handed to refinement predicates and error formatters.
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    /// Validates list items, tuple slots and dict entries on the rayon pool.
    ///
    /// Results and errors keep input order either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The path of the root value.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The strictness override, if one was set.
    pub fn strict(&self) -> Option<bool> {
        self.strict
    }

    /// The caller's opaque context value.
    pub fn context(&self) -> &Value {
        &self.context
    }

    /// Whether sibling values are validated on the rayon pool.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

impl From<Path> for Options {
    fn from(path: Path) -> Self {
        Options::new().with_path(path)
    }
}

impl From<Vec<PathSegment>> for Options {
    fn from(segments: Vec<PathSegment>) -> Self {
        Options::new().with_path(Path::from(segments))
    }
}

/// Access to named types and kind validators during a traversal.
///
/// This trait decouples the dispatcher from the concrete registry.
pub trait RegistryAccess: Send + Sync {
    /// Gets a named type.
    fn get_type(&self, name: &str) -> Option<Type>;

    /// Gets the validator registered for a kind tag.
    fn get_kind(&self, tag: &str) -> Option<std::sync::Arc<dyn kinds::KindValidator>>;

    /// The longest chain of references a traversal may follow.
    fn max_depth(&self) -> usize;
}

/// A registry with nothing in it.
///
/// References never resolve, so the depth limit only bounds traversals that
/// cannot happen. It matches [`crate::TypeRegistry`]'s default anyway.
pub(crate) struct NoRegistry;

impl RegistryAccess for NoRegistry {
    fn get_type(&self, _name: &str) -> Option<Type> {
        None
    }

    fn get_kind(&self, _tag: &str) -> Option<std::sync::Arc<dyn kinds::KindValidator>> {
        None
    }

    fn max_depth(&self) -> usize {
        DEFAULT_MAX_DEPTH
    }
}

/// The dispatcher: selects a kind validator for each descriptor and recurses.
#[derive(Clone, Copy)]
pub struct Recursor<'a> {
    registry: &'a dyn RegistryAccess,
    options: &'a Options,
    depth: usize,
}

impl<'a> Recursor<'a> {
    /// Creates a recursor at reference depth zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tyval::{Options, Path, Recursor, Type, TypeRegistry, Value};
    ///
    /// let registry = TypeRegistry::new();
    /// let options = Options::default();
    /// let recursor = Recursor::new(&registry, &options);
    ///
    /// let result = recursor.recurse(&Value::from(1), &Type::number(), &Path::root());
    /// assert!(result.is_valid());
    /// assert_eq!(recursor.depth(), 0);
    /// ```
    pub fn new(registry: &'a dyn RegistryAccess, options: &'a Options) -> Self {
        Self {
            registry,
            options,
            depth: 0,
        }
    }

    /// Validates `value` against `ty` at `path`.
    ///
    /// A validator registered for the descriptor's kind tag takes precedence
    /// over the built-in one. Plain classes, and custom kinds nobody
    /// registered, get the instance check.
    pub fn recurse(&self, value: &Value, ty: &Type, path: &Path) -> ValidationResult {
        if let Some(tag) = ty.kind().tag() {
            if let Some(validator) = self.registry.get_kind(tag) {
                tracing::trace!(kind = tag, path = %path, "using registered kind validator");
                return validator.validate(value, ty, path, self);
            }
        }

        match ty.kind() {
            Kind::Irreducible(_) | Kind::Enums(_) => kinds::irreducible(value, ty, path, self),
            Kind::List(element) => kinds::list(value, ty, element, path, self),
            Kind::Tuple(types) => kinds::tuple(value, ty, types, path, self),
            Kind::Struct(props) => kinds::structure(value, ty, props, path, self),
            Kind::Interface(props) => kinds::interface(value, ty, props, path, self),
            Kind::Dict { domain, codomain } => kinds::dict(value, ty, domain, codomain, path, self),
            Kind::Union { types, dispatch } => {
                kinds::union(value, ty, types, dispatch.as_ref(), path, self)
            }
            Kind::Intersection(types) => kinds::intersection(value, ty, types, path, self),
            Kind::Subtype { inner, predicate } => {
                kinds::subtype(value, ty, inner, predicate, path, self)
            }
            Kind::Maybe(inner) => kinds::maybe(value, inner, path, self),
            Kind::Ref(name) => kinds::reference(value, ty, name, path, self),
            Kind::Class | Kind::Custom { .. } => kinds::instance(value, ty, path, self),
        }
    }

    /// Membership test that resolves references through the registry.
    pub fn is(&self, value: &Value, ty: &Type) -> bool {
        is_member(value, ty, self.registry, self.depth)
    }

    /// A single-error result for `value` failing `ty` at `path`.
    pub fn fail(&self, value: &Value, ty: &Type, path: &Path) -> ValidationResult {
        ValidationResult::invalid(value.clone(), self.error(value, ty, path))
    }

    /// The error for `value` failing `ty` at `path`, formatted with the
    /// caller's context.
    pub fn error(&self, value: &Value, ty: &Type, path: &Path) -> ValidationError {
        ValidationError::of(value, ty, path, self.context())
    }

    /// Runs `f` over `0..len`, on the rayon pool when the options ask for it.
    /// The output is in index order.
    pub fn map_indexed<R, F>(&self, len: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Send + Sync,
    {
        if self.options.is_parallel() {
            (0..len).into_par_iter().map(f).collect()
        } else {
            (0..len).map(f).collect()
        }
    }

    /// Resolves a named type.
    pub fn resolve(&self, name: &str) -> Option<Type> {
        self.registry.get_type(name)
    }

    /// A recursor one reference deeper, or `None` past the depth limit.
    pub fn follow(&self) -> Option<Self> {
        if self.depth >= self.registry.max_depth() {
            None
        } else {
            Some(Self {
                depth: self.depth + 1,
                ..*self
            })
        }
    }

    /// The number of references followed to reach this point.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The registry's reference depth limit.
    pub fn max_depth(&self) -> usize {
        self.registry.max_depth()
    }

    /// The strictness override from the options.
    pub fn strict(&self) -> Option<bool> {
        self.options.strict()
    }

    /// The caller's context value from the options.
    pub fn context(&self) -> &Value {
        self.options.context()
    }

    /// The options of the current validate call.
    pub fn options(&self) -> &Options {
        self.options
    }
}
