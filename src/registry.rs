//! Registry of named types and kind validators.
//!
//! This module provides [`TypeRegistry`], the object handed to each validate
//! call. It holds named types (the targets of [`Type::reference`]) and the
//! kind validators that extend or override the built-in strategies.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::kinds::KindValidator;
use crate::result::ValidationResult;
use crate::types::Type;
use crate::validation::{Options, Recursor, RegistryAccess, DEFAULT_MAX_DEPTH};
use crate::value::Value;

type TypeMap = Arc<RwLock<HashMap<String, Type>>>;
type KindMap = Arc<RwLock<HashMap<String, Arc<dyn KindValidator>>>>;

/// A thread-safe registry of named types and kind validators.
///
/// Clones share the same underlying maps. Validation only takes read locks,
/// so any number of threads can validate concurrently; registration is
/// serialized.
///
/// # Example
///
/// ```rust
/// use tyval::{Options, Type, TypeRegistry, Value};
/// use serde_json::json;
///
/// let registry = TypeRegistry::new();
/// registry
///     .define(
///         "Comment",
///         Type::interface()
///             .field("text", Type::string())
///             .field("replies", Type::maybe(Type::list(Type::reference("Comment"))))
///             .build(),
///     )
///     .unwrap();
///
/// let comment = Value::from(json!({"text": "top", "replies": [{"text": "reply"}]}));
/// let result = registry.validate_named("Comment", &comment, Options::default()).unwrap();
/// assert!(result.is_valid());
/// ```
pub struct TypeRegistry {
    types: TypeMap,
    kinds: KindMap,
    max_depth: usize,
}

impl TypeRegistry {
    /// Creates an empty registry with the default max reference depth (100).
    pub fn new() -> Self {
        Self {
            types: Arc::new(RwLock::new(HashMap::new())),
            kinds: Arc::new(RwLock::new(HashMap::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum number of references followed in one chain.
    ///
    /// Past the limit the reference fails validation instead of being followed.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Registers a named type.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already defined.
    pub fn define(&self, name: impl Into<String>, ty: Type) -> Result<(), RegistryError> {
        let name = name.into();
        let mut types = self.types.write();

        if types.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        types.insert(name, ty);
        Ok(())
    }

    /// Retrieves a named type.
    pub fn get(&self, name: &str) -> Option<Type> {
        self.types.read().get(name).cloned()
    }

    /// Registers a validator for a kind tag.
    ///
    /// The tag can name a built-in kind (`"struct"`, `"list"`, ...), which the
    /// validator then overrides, or a custom kind built with [`Type::custom`].
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateKind` if a validator is already
    /// registered for the tag. Use [`TypeRegistry::set_kind`] to replace one.
    pub fn register_kind<K>(
        &self,
        tag: impl Into<String>,
        validator: K,
    ) -> Result<(), RegistryError>
    where
        K: KindValidator + 'static,
    {
        let tag = tag.into();
        let mut kinds = self.kinds.write();

        if kinds.contains_key(&tag) {
            return Err(RegistryError::DuplicateKind(tag));
        }

        kinds.insert(tag, Arc::new(validator));
        Ok(())
    }

    /// Registers or replaces the validator for a kind tag, returning the previous one.
    pub fn set_kind<K>(
        &self,
        tag: impl Into<String>,
        validator: K,
    ) -> Option<Arc<dyn KindValidator>>
    where
        K: KindValidator + 'static,
    {
        self.kinds.write().insert(tag.into(), Arc::new(validator))
    }

    /// Removes the validator for a kind tag, restoring the built-in behavior.
    pub fn remove_kind(&self, tag: &str) -> Option<Arc<dyn KindValidator>> {
        self.kinds.write().remove(tag)
    }

    /// Tags that currently have a registered validator, sorted.
    pub fn kind_tags(&self) -> Vec<String> {
        let mut tags: Vec<_> = self.kinds.read().keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Returns the referenced names that no defined type satisfies.
    ///
    /// Call this after all types are defined to check reference integrity.
    pub fn unresolved_refs(&self) -> Vec<String> {
        let types = self.types.read();
        let mut all_refs = Vec::new();

        for ty in types.values() {
            ty.collect_refs(&mut all_refs);
        }

        let mut unresolved: Vec<_> = all_refs
            .into_iter()
            .filter(|name| !types.contains_key(name))
            .collect();
        unresolved.sort();
        unresolved.dedup();
        unresolved
    }

    /// Validates `value` against `ty`.
    ///
    /// `options` may be a bare [`crate::Path`], which then becomes the path of
    /// the root value.
    pub fn validate(
        &self,
        value: &Value,
        ty: &Type,
        options: impl Into<Options>,
    ) -> ValidationResult {
        let options = options.into();
        let result = Recursor::new(self, &options).recurse(value, ty, options.path());

        tracing::debug!(
            descriptor = %ty.name(),
            errors = result.errors.len(),
            "validated value"
        );
        result
    }

    /// Validates `value` against a named type.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::TypeNotFound` if no type has that name.
    pub fn validate_named(
        &self,
        name: &str,
        value: &Value,
        options: impl Into<Options>,
    ) -> Result<ValidationResult, RegistryError> {
        let ty = self
            .get(name)
            .ok_or_else(|| RegistryError::TypeNotFound(name.to_string()))?;
        Ok(self.validate(value, &ty, options))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TypeRegistry {
    fn clone(&self) -> Self {
        Self {
            types: Arc::clone(&self.types),
            kinds: Arc::clone(&self.kinds),
            max_depth: self.max_depth,
        }
    }
}

impl RegistryAccess for TypeRegistry {
    fn get_type(&self, name: &str) -> Option<Type> {
        self.get(name)
    }

    fn get_kind(&self, tag: &str) -> Option<Arc<dyn KindValidator>> {
        self.kinds.read().get(tag).cloned()
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to define a type with a name that already exists.
    #[error("type '{0}' already defined")]
    DuplicateName(String),

    /// Attempted to register a second validator for a kind tag.
    #[error("a validator for kind '{0}' is already registered")]
    DuplicateKind(String),

    /// Attempted to validate against a name that isn't defined.
    #[error("type '{0}' not found")]
    TypeNotFound(String),
}
