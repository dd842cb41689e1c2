//! Error-free membership tests (`is`) for every kind.

use super::{Kind, Type};
use crate::validation::RegistryAccess;
use crate::value::Value;

/// Returns true if `value` is a member of `ty`.
///
/// `depth` counts the references followed so far; past the registry's limit
/// a reference never matches.
pub(crate) fn is_member(
    value: &Value,
    ty: &Type,
    access: &dyn RegistryAccess,
    depth: usize,
) -> bool {
    let is = |value: &Value, ty: &Type| is_member(value, ty, access, depth);

    match ty.kind() {
        Kind::Irreducible(test) => test(value),
        Kind::Enums(map) => value.as_str().is_some_and(|s| map.contains_key(s)),
        Kind::List(element) => value
            .as_array()
            .is_some_and(|items| items.iter().all(|item| is(item, element))),
        Kind::Tuple(types) => value.as_array().is_some_and(|items| {
            items.len() == types.len() && items.iter().zip(types).all(|(item, ty)| is(item, ty))
        }),
        Kind::Struct(_) | Kind::Class | Kind::Custom { .. } => {
            value.as_instance().is_some_and(|i| i.is_instance_of(ty))
        }
        Kind::Interface(props) => value.as_object().is_some_and(|fields| {
            props
                .props()
                .iter()
                .all(|(name, prop)| is(value.get(name), prop))
                && (!props.strict()
                    || fields
                        .iter()
                        .all(|(k, v)| props.declares(k) || v.is_nil()))
        }),
        Kind::Dict { domain, codomain } => value.as_object().is_some_and(|fields| {
            fields
                .iter()
                .all(|(k, v)| {
                    is(&Value::String(k.clone()), domain) && is(v, codomain)
                })
        }),
        Kind::Union { types, .. } => types.iter().any(|member| is(value, member)),
        Kind::Intersection(types) => types.iter().all(|member| is(value, member)),
        Kind::Subtype { inner, predicate } => {
            is(value, inner) && predicate(value, &Value::Undefined)
        }
        Kind::Maybe(inner) => value.is_nil() || is(value, inner),
        Kind::Ref(name) => {
            depth < access.max_depth()
                && access
                    .get_type(name)
                    .is_some_and(|resolved| is_member(value, &resolved, access, depth + 1))
        }
    }
}
