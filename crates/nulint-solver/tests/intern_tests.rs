use crate::intern::TypeInterner;
use crate::types::{IntrinsicKind, ParamInfo, TypeData, TypeId};
use nulint_common::interner::{Atom, Interner};

#[test]
fn intrinsic_ids_are_stable() {
    let types = TypeInterner::new();
    assert_eq!(types.intern(TypeData::Intrinsic(IntrinsicKind::Any)), TypeId::ANY);
    assert_eq!(types.intern(TypeData::Intrinsic(IntrinsicKind::Null)), TypeId::NULL);
    assert_eq!(
        types.intern(TypeData::Intrinsic(IntrinsicKind::Undefined)),
        TypeId::UNDEFINED
    );
    assert_eq!(types.intern(TypeData::Intrinsic(IntrinsicKind::Void)), TypeId::VOID);
}

#[test]
fn union_deduplicates_and_collapses() {
    let types = TypeInterner::new();
    let a = types.union(&[TypeId::STRING, TypeId::NULL]);
    let b = types.union(&[TypeId::NULL, TypeId::STRING, TypeId::NULL]);
    assert_eq!(a, b);

    let single = types.union(&[TypeId::STRING, TypeId::STRING]);
    assert_eq!(single, TypeId::STRING);

    assert_eq!(types.union(&[]), TypeId::NEVER);
}

#[test]
fn nested_unions_flatten() {
    let types = TypeInterner::new();
    let inner = types.union(&[TypeId::STRING, TypeId::NULL]);
    let outer = types.union(&[inner, TypeId::UNDEFINED]);
    let flat = types.union(&[TypeId::STRING, TypeId::NULL, TypeId::UNDEFINED]);
    assert_eq!(outer, flat);

    let TypeData::Union(list_id) = types.lookup(outer) else {
        panic!("expected union");
    };
    assert_eq!(types.type_list(list_id).len(), 3);
}

#[test]
fn arrays_and_functions_intern_structurally() {
    let types = TypeInterner::new();
    let a = types.array(TypeId::NUMBER);
    let b = types.array(TypeId::NUMBER);
    assert_eq!(a, b);
    assert_ne!(a, types.array(TypeId::STRING));

    let mut names = Interner::new();
    let x = names.intern("x");
    let param = ParamInfo {
        name: x,
        type_id: TypeId::NUMBER,
        optional: false,
    };
    let f = types.function(vec![param.clone()], TypeId::STRING);
    let g = types.function(vec![param], TypeId::STRING);
    assert_eq!(f, g);
    let h = types.function(
        vec![ParamInfo {
            name: Atom::NONE,
            type_id: TypeId::NUMBER,
            optional: true,
        }],
        TypeId::STRING,
    );
    assert_ne!(f, h);
}
