//! Type queries.
//!
//! `absence_flags` is the core question the lint asks: which nullish values
//! can a type hold. Unresolved types (`any`, `unknown`, `error`) report no
//! flags, so analysis stays quiet rather than guessing.

use crate::intern::TypeInterner;
use crate::types::{AbsenceFlags, FunctionShapeId, IntrinsicKind, TypeData, TypeId};

/// Which of `null` / `undefined` the type admits. `void` counts as
/// `undefined`. Unions accumulate flags across members.
pub fn absence_flags(types: &TypeInterner, id: TypeId) -> AbsenceFlags {
    match types.lookup(id) {
        TypeData::Intrinsic(IntrinsicKind::Null) => AbsenceFlags::NULL,
        TypeData::Intrinsic(IntrinsicKind::Undefined | IntrinsicKind::Void) => {
            AbsenceFlags::UNDEFINED
        }
        TypeData::Union(list_id) => {
            let mut flags = AbsenceFlags::empty();
            for member in types.type_list(list_id) {
                flags |= absence_flags(types, member);
            }
            flags
        }
        _ => AbsenceFlags::empty(),
    }
}

fn member_matches(types: &TypeInterner, id: TypeId, flags: AbsenceFlags) -> bool {
    match types.lookup(id) {
        TypeData::Intrinsic(IntrinsicKind::Null) => flags.contains(AbsenceFlags::NULL),
        TypeData::Intrinsic(IntrinsicKind::Undefined | IntrinsicKind::Void) => {
            flags.contains(AbsenceFlags::UNDEFINED)
        }
        _ => false,
    }
}

/// Remove the nullish members named by `flags` from a type. A type with no
/// members left becomes `never`.
pub fn subtract_absence(types: &TypeInterner, id: TypeId, flags: AbsenceFlags) -> TypeId {
    if flags.is_empty() {
        return id;
    }
    match types.lookup(id) {
        TypeData::Union(list_id) => {
            let members: Vec<TypeId> = types
                .type_list(list_id)
                .into_iter()
                .filter(|&member| !member_matches(types, member, flags))
                .collect();
            types.union(&members)
        }
        _ if member_matches(types, id, flags) => TypeId::NEVER,
        _ => id,
    }
}

/// Remove `null`, `undefined`, and `void` members from a type.
pub fn strip_nullish(types: &TypeInterner, id: TypeId) -> TypeId {
    subtract_absence(types, id, AbsenceFlags::all())
}

/// First call signature of a type, looking through nullish union members.
pub fn first_call_signature(types: &TypeInterner, id: TypeId) -> Option<FunctionShapeId> {
    match types.lookup(id) {
        TypeData::Function(shape) => Some(shape),
        TypeData::Union(list_id) => types
            .type_list(list_id)
            .into_iter()
            .find_map(|member| match types.lookup(member) {
                TypeData::Function(shape) => Some(shape),
                _ => None,
            }),
        _ => None,
    }
}

/// Element type of an array type.
pub fn array_element_type(types: &TypeInterner, id: TypeId) -> Option<TypeId> {
    match types.lookup(id) {
        TypeData::Array(element) => Some(element),
        _ => None,
    }
}
