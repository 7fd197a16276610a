//! Type interning and nullability queries for the nulint analyzer.
//!
//! The checker builds types through [`TypeInterner`] and asks
//! [`absence_flags`] whether a value could be `null` or `undefined`. Types
//! are structural and interned, so equality is id equality.

pub mod format;
pub mod intern;
pub mod queries;
pub mod types;

pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use queries::{
    absence_flags, array_element_type, first_call_signature, strip_nullish, subtract_absence,
};
pub use types::{
    AbsenceFlags, FunctionShape, FunctionShapeId, IntrinsicKind, ParamInfo, TypeData, TypeId,
    TypeListId,
};

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod intern_tests;

#[cfg(test)]
#[path = "../tests/absence_tests.rs"]
mod absence_tests;
