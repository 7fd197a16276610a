use crate::intern::TypeInterner;
use crate::queries::{absence_flags, array_element_type, first_call_signature, strip_nullish};
use crate::types::{AbsenceFlags, ParamInfo, TypeData, TypeId};
use nulint_common::interner::Interner;

#[test]
fn intrinsic_absence_flags() {
    let types = TypeInterner::new();
    assert_eq!(absence_flags(&types, TypeId::NULL), AbsenceFlags::NULL);
    assert_eq!(absence_flags(&types, TypeId::UNDEFINED), AbsenceFlags::UNDEFINED);
    // void holds undefined at runtime
    assert_eq!(absence_flags(&types, TypeId::VOID), AbsenceFlags::UNDEFINED);
    assert_eq!(absence_flags(&types, TypeId::NUMBER), AbsenceFlags::empty());
    assert_eq!(absence_flags(&types, TypeId::STRING), AbsenceFlags::empty());
}

#[test]
fn unresolved_types_report_nothing() {
    let types = TypeInterner::new();
    assert_eq!(absence_flags(&types, TypeId::ANY), AbsenceFlags::empty());
    assert_eq!(absence_flags(&types, TypeId::UNKNOWN), AbsenceFlags::empty());
    assert_eq!(absence_flags(&types, TypeId::ERROR), AbsenceFlags::empty());
}

#[test]
fn union_flags_accumulate() {
    let types = TypeInterner::new();
    let string_or_null = types.union(&[TypeId::STRING, TypeId::NULL]);
    assert_eq!(absence_flags(&types, string_or_null), AbsenceFlags::NULL);

    let optional = types.union(&[TypeId::NUMBER, TypeId::UNDEFINED]);
    assert_eq!(absence_flags(&types, optional), AbsenceFlags::UNDEFINED);

    let both = types.union(&[TypeId::STRING, TypeId::NULL, TypeId::UNDEFINED]);
    assert_eq!(
        absence_flags(&types, both),
        AbsenceFlags::NULL | AbsenceFlags::UNDEFINED
    );
}

#[test]
fn nested_union_flags_reach_all_members() {
    let types = TypeInterner::new();
    let inner = types.union(&[TypeId::NULL, TypeId::BOOLEAN]);
    let outer = types.union(&[TypeId::STRING, inner, TypeId::VOID]);
    assert_eq!(
        absence_flags(&types, outer),
        AbsenceFlags::NULL | AbsenceFlags::UNDEFINED
    );
}

#[test]
fn strip_nullish_keeps_the_rest() {
    let types = TypeInterner::new();
    let mixed = types.union(&[TypeId::STRING, TypeId::NULL, TypeId::UNDEFINED]);
    assert_eq!(strip_nullish(&types, mixed), TypeId::STRING);

    let wide = types.union(&[TypeId::STRING, TypeId::NUMBER, TypeId::NULL]);
    let stripped = strip_nullish(&types, wide);
    assert_eq!(stripped, types.union(&[TypeId::STRING, TypeId::NUMBER]));

    assert_eq!(strip_nullish(&types, TypeId::NULL), TypeId::NEVER);
    let only_nullish = types.union(&[TypeId::NULL, TypeId::UNDEFINED]);
    assert_eq!(strip_nullish(&types, only_nullish), TypeId::NEVER);

    assert_eq!(strip_nullish(&types, TypeId::NUMBER), TypeId::NUMBER);
}

#[test]
fn call_signature_through_nullish_union() {
    let types = TypeInterner::new();
    let mut names = Interner::new();
    let cb = types.function(
        vec![ParamInfo {
            name: names.intern("x"),
            type_id: types.union(&[TypeId::NUMBER, TypeId::NULL]),
            optional: false,
        }],
        TypeId::NUMBER,
    );

    let shape_id = first_call_signature(&types, cb).unwrap();
    let shape = types.function_shape(shape_id);
    assert_eq!(shape.params.len(), 1);
    assert_eq!(shape.return_type, TypeId::NUMBER);

    // optional callback slot: (x: number | null) => number | undefined
    let optional_slot = types.union(&[cb, TypeId::UNDEFINED]);
    assert_eq!(first_call_signature(&types, optional_slot), Some(shape_id));

    assert_eq!(first_call_signature(&types, TypeId::STRING), None);
    let TypeData::Function(_) = types.lookup(cb) else {
        panic!("expected function type");
    };
}

#[test]
fn array_element_lookup() {
    let types = TypeInterner::new();
    let element = types.union(&[TypeId::STRING, TypeId::NULL]);
    let array = types.array(element);
    assert_eq!(array_element_type(&types, array), Some(element));
    assert_eq!(array_element_type(&types, TypeId::STRING), None);
}
