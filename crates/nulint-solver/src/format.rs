//! Type display for diagnostics.

use nulint_common::interner::Interner;

use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId};

/// Formats types the way they would appear in source: `string | null`,
/// `(string | undefined)[]`, `(x: number) => string`.
pub struct TypeFormatter<'a> {
    types: &'a TypeInterner,
    names: &'a Interner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(types: &'a TypeInterner, names: &'a Interner) -> TypeFormatter<'a> {
        TypeFormatter { types, names }
    }

    pub fn format(&self, id: TypeId) -> String {
        match self.types.lookup(id) {
            TypeData::Intrinsic(kind) => kind.name().to_string(),
            TypeData::Union(list_id) => {
                let members = self.types.type_list(list_id);
                let parts: Vec<String> =
                    members.into_iter().map(|member| self.format(member)).collect();
                parts.join(" | ")
            }
            TypeData::Array(element) => {
                let inner = self.format(element);
                if self.needs_parens(element) {
                    format!("({inner})[]")
                } else {
                    format!("{inner}[]")
                }
            }
            TypeData::Function(shape_id) => {
                let shape = self.types.function_shape(shape_id);
                let params: Vec<String> = shape
                    .params
                    .iter()
                    .map(|param| {
                        let name = self.names.resolve(param.name);
                        let question = if param.optional { "?" } else { "" };
                        format!("{name}{question}: {}", self.format(param.type_id))
                    })
                    .collect();
                format!("({}) => {}", params.join(", "), self.format(shape.return_type))
            }
        }
    }

    fn needs_parens(&self, id: TypeId) -> bool {
        matches!(
            self.types.lookup(id),
            TypeData::Union(_) | TypeData::Function(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamInfo;

    #[test]
    fn formats_unions_and_arrays() {
        let types = TypeInterner::new();
        let names = Interner::new();
        let formatter = TypeFormatter::new(&types, &names);

        let union = types.union(&[TypeId::STRING, TypeId::NULL]);
        assert_eq!(formatter.format(union), "string | null");
        assert_eq!(formatter.format(types.array(union)), "(string | null)[]");
        assert_eq!(formatter.format(types.array(TypeId::NUMBER)), "number[]");
    }

    #[test]
    fn formats_function_shapes() {
        let types = TypeInterner::new();
        let mut names = Interner::new();
        let x = names.intern("x");
        let f = types.function(
            vec![ParamInfo {
                name: x,
                type_id: types.union(&[TypeId::NUMBER, TypeId::UNDEFINED]),
                optional: true,
            }],
            TypeId::NUMBER,
        );
        let formatter = TypeFormatter::new(&types, &names);
        assert_eq!(formatter.format(f), "(x?: number | undefined) => number");
    }
}
