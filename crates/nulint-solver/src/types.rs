//! Core type representation.
//!
//! Types are interned: a `TypeId` is an index into the interner's table, and
//! structurally equal types always share an id. The intrinsic types are
//! pre-interned at fixed ids so they can be compared as constants.

use bitflags::bitflags;
use nulint_common::interner::Atom;
use serde::Serialize;

/// Interned type handle. Equal ids mean structurally equal types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const NEVER: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);
    pub const NUMBER: TypeId = TypeId(4);
    pub const BOOLEAN: TypeId = TypeId(5);
    pub const NULL: TypeId = TypeId(6);
    pub const UNDEFINED: TypeId = TypeId(7);
    pub const VOID: TypeId = TypeId(8);
    pub const ERROR: TypeId = TypeId(9);
}

/// The intrinsic (non-structural) types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Any,
    Unknown,
    Never,
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Void,
    Error,
}

impl IntrinsicKind {
    pub fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Any => "any",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Never => "never",
            IntrinsicKind::String => "string",
            IntrinsicKind::Number => "number",
            IntrinsicKind::Boolean => "boolean",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Error => "error",
        }
    }
}

/// Index of an interned, canonical member list of a union.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

/// Index of a function shape (parameter list and return type).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShapeId(pub u32);

/// Structural description of a type, keyed in the interner map.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    /// Members are flattened, deduplicated, and sorted by id.
    Union(TypeListId),
    Array(TypeId),
    Function(FunctionShapeId),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
}

bitflags! {
    /// Which nullish values a type can hold.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct AbsenceFlags: u8 {
        const NULL = 1 << 0;
        const UNDEFINED = 1 << 1;
    }
}
