//! Type interner.
//!
//! All type construction goes through `TypeInterner`, which guarantees that
//! structurally equal types get the same `TypeId`. The table is behind an
//! `RwLock` so a shared interner can be read from multiple threads while
//! files are analyzed in parallel.

use std::sync::RwLock;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::types::{
    FunctionShape, FunctionShapeId, IntrinsicKind, ParamInfo, TypeData, TypeId, TypeListId,
};

#[derive(Default)]
struct InternerTables {
    map: FxHashMap<TypeData, TypeId>,
    types: Vec<TypeData>,
    list_map: FxHashMap<Vec<TypeId>, TypeListId>,
    type_lists: Vec<Vec<TypeId>>,
    function_shapes: Vec<FunctionShape>,
}

pub struct TypeInterner {
    tables: RwLock<InternerTables>,
}

impl Default for TypeInterner {
    fn default() -> TypeInterner {
        TypeInterner::new()
    }
}

/// Intrinsics pre-interned by `new`, in `TypeId` constant order.
const INTRINSICS: &[IntrinsicKind] = &[
    IntrinsicKind::Any,
    IntrinsicKind::Unknown,
    IntrinsicKind::Never,
    IntrinsicKind::String,
    IntrinsicKind::Number,
    IntrinsicKind::Boolean,
    IntrinsicKind::Null,
    IntrinsicKind::Undefined,
    IntrinsicKind::Void,
    IntrinsicKind::Error,
];

impl TypeInterner {
    pub fn new() -> TypeInterner {
        let mut tables = InternerTables::default();
        for &kind in INTRINSICS {
            let id = TypeId(tables.types.len() as u32);
            tables.types.push(TypeData::Intrinsic(kind));
            tables.map.insert(TypeData::Intrinsic(kind), id);
        }
        debug_assert_eq!(tables.map[&TypeData::Intrinsic(IntrinsicKind::Null)], TypeId::NULL);
        TypeInterner {
            tables: RwLock::new(tables),
        }
    }

    /// Intern a structural description, returning its canonical id.
    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self.tables.read().expect("interner lock").map.get(&data) {
            return id;
        }
        let mut tables = self.tables.write().expect("interner lock");
        if let Some(&id) = tables.map.get(&data) {
            return id;
        }
        let id = TypeId(tables.types.len() as u32);
        trace!(?data, id = id.0, "intern type");
        tables.types.push(data.clone());
        tables.map.insert(data, id);
        id
    }

    /// Structural description for an id. Ids only come from this interner,
    /// so the lookup is infallible.
    pub fn lookup(&self, id: TypeId) -> TypeData {
        self.tables.read().expect("interner lock").types[id.0 as usize].clone()
    }

    /// Member list of an interned union.
    pub fn type_list(&self, id: TypeListId) -> Vec<TypeId> {
        self.tables.read().expect("interner lock").type_lists[id.0 as usize].clone()
    }

    pub fn function_shape(&self, id: FunctionShapeId) -> FunctionShape {
        self.tables.read().expect("interner lock").function_shapes[id.0 as usize].clone()
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    pub fn function(&self, params: Vec<ParamInfo>, return_type: TypeId) -> TypeId {
        let shape = FunctionShape {
            params,
            return_type,
        };
        let mut tables = self.tables.write().expect("interner lock");
        let shape_id = match tables.function_shapes.iter().position(|s| *s == shape) {
            Some(pos) => FunctionShapeId(pos as u32),
            None => {
                let id = FunctionShapeId(tables.function_shapes.len() as u32);
                tables.function_shapes.push(shape);
                id
            }
        };
        drop(tables);
        self.intern(TypeData::Function(shape_id))
    }

    /// Build a union: members are flattened (nested unions expanded),
    /// deduplicated, and sorted by id. A single surviving member collapses
    /// to itself; an empty list is `never`.
    pub fn union(&self, members: &[TypeId]) -> TypeId {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        for &member in members {
            self.flatten_into(member, &mut flat);
        }
        flat.sort_unstable();
        flat.dedup();
        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => {
                let list = flat.to_vec();
                let list_id = {
                    let mut tables = self.tables.write().expect("interner lock");
                    match tables.list_map.get(&list) {
                        Some(&id) => id,
                        None => {
                            let id = TypeListId(tables.type_lists.len() as u32);
                            tables.type_lists.push(list.clone());
                            tables.list_map.insert(list, id);
                            id
                        }
                    }
                };
                self.intern(TypeData::Union(list_id))
            }
        }
    }

    fn flatten_into(&self, member: TypeId, out: &mut SmallVec<[TypeId; 8]>) {
        if let TypeData::Union(list_id) = self.lookup(member) {
            for nested in self.type_list(list_id) {
                self.flatten_into(nested, out);
            }
        } else {
            out.push(member);
        }
    }
}
