//! Expression type inference.
//!
//! `TypeResolver` computes the type of any expression node on demand, walking
//! declarations through the scope tree. Inference is deliberately shallow:
//! anything the subset does not model comes out as `any`, which the absence
//! oracle treats as "nothing proven", so unknown code never gets flagged.
//!
//! Strict-equality narrowing is applied on top: inside the true branch of
//! `e !== null ? ... : ...` the type of `e` loses its `null` member. This is
//! what keeps already-guarded conversions quiet.

use std::cell::Cell;

use nulint_common::interner::Atom;
use nulint_parser::syntax_kind_ext::*;
use nulint_parser::{Node, NodeArena, NodeIndex};
use nulint_scanner::SyntaxKind;
use nulint_solver::{
    AbsenceFlags, FunctionShape, ParamInfo, TypeId, TypeInterner, absence_flags,
    array_element_type, first_call_signature, strip_nullish, subtract_absence,
};
use tracing::trace;

use crate::fix::normalized_expression_text;
use crate::scopes::ScopeTree;

/// Bound on ancestor walks and declaration-chain recursion; inputs that
/// exceed it resolve to `any`.
const MAX_DEPTH: u32 = 64;

pub struct TypeResolver<'a> {
    arena: &'a NodeArena,
    types: &'a TypeInterner,
    scopes: &'a ScopeTree,
    source: &'a str,
    depth: Cell<u32>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(
        arena: &'a NodeArena,
        types: &'a TypeInterner,
        scopes: &'a ScopeTree,
        source: &'a str,
    ) -> TypeResolver<'a> {
        TypeResolver {
            arena,
            types,
            scopes,
            source,
            depth: Cell::new(0),
        }
    }

    /// Type of an expression node, with strict-equality narrowing applied.
    pub fn type_of_expression(&self, index: NodeIndex) -> TypeId {
        if self.depth.get() >= MAX_DEPTH {
            return TypeId::ANY;
        }
        self.depth.set(self.depth.get() + 1);
        let result = self.type_of_expression_inner(index);
        self.depth.set(self.depth.get() - 1);
        result
    }

    fn type_of_expression_inner(&self, index: NodeIndex) -> TypeId {
        let idx = self.arena.skip_parenthesized(index);
        let Some(node) = self.arena.get(idx) else {
            return TypeId::ERROR;
        };
        let base = match node.kind {
            k if k == SyntaxKind::NumericLiteral as u16 => TypeId::NUMBER,
            k if k == SyntaxKind::StringLiteral as u16 => TypeId::STRING,
            k if k == SyntaxKind::NullKeyword as u16 => TypeId::NULL,
            k if k == SyntaxKind::TrueKeyword as u16 => TypeId::BOOLEAN,
            k if k == SyntaxKind::FalseKeyword as u16 => TypeId::BOOLEAN,
            k if k == SyntaxKind::Identifier as u16 => self.type_of_identifier(idx),
            PROPERTY_ACCESS_EXPRESSION => self.type_of_property_access(node),
            ELEMENT_ACCESS_EXPRESSION => self.type_of_element_access(node),
            CALL_EXPRESSION => self.type_of_call(idx),
            CONDITIONAL_EXPRESSION => {
                let Some(cond) = self.arena.get_conditional_expr(node) else {
                    return TypeId::ERROR;
                };
                let when_true = self.type_of_expression(cond.when_true);
                let when_false = self.type_of_expression(cond.when_false);
                self.types.union(&[when_true, when_false])
            }
            BINARY_EXPRESSION => {
                let Some(binary) = self.arena.get_binary_expr(node) else {
                    return TypeId::ERROR;
                };
                let eq = SyntaxKind::EqualsEqualsEqualsToken as u16;
                let neq = SyntaxKind::ExclamationEqualsEqualsToken as u16;
                if binary.operator_token == eq || binary.operator_token == neq {
                    TypeId::BOOLEAN
                } else {
                    TypeId::ANY
                }
            }
            ARROW_FUNCTION => self.type_of_arrow(node),
            _ => TypeId::ANY,
        };
        self.apply_narrowing(idx, base)
    }

    fn type_of_identifier(&self, idx: NodeIndex) -> TypeId {
        let atom = self.arena.identifier_atom(idx);
        match self.scopes.resolve(idx, atom) {
            Some(declaration) => self.declaration_type(declaration),
            None => match self.arena.identifier_text(idx) {
                "undefined" => TypeId::UNDEFINED,
                "NaN" | "Infinity" => TypeId::NUMBER,
                _ => TypeId::ANY,
            },
        }
    }

    /// Type of the entity a declaration introduces.
    fn declaration_type(&self, declaration: NodeIndex) -> TypeId {
        let Some(node) = self.arena.get(declaration) else {
            return TypeId::ANY;
        };
        match node.kind {
            VARIABLE_DECLARATION => {
                let Some(decl) = self.arena.get_variable_declaration(node) else {
                    return TypeId::ANY;
                };
                if !decl.type_annotation.is_none() {
                    self.type_from_type_node(decl.type_annotation)
                } else if !decl.initializer.is_none() {
                    self.type_of_expression(decl.initializer)
                } else {
                    TypeId::ANY
                }
            }
            PARAMETER => self.parameter_type(declaration).0,
            FUNCTION_DECLARATION => {
                let shape = self.function_decl_shape(declaration);
                self.types.function(shape.params, shape.return_type)
            }
            _ => TypeId::ANY,
        }
    }

    /// Declared or contextual type of a parameter, `| undefined` added for
    /// `?` parameters. Also returns whether the parameter was optional.
    pub fn parameter_type(&self, parameter: NodeIndex) -> (TypeId, bool) {
        let Some(param) = self.arena.get(parameter).and_then(|n| self.arena.get_parameter(n))
        else {
            return (TypeId::ANY, false);
        };
        let mut ty = if param.type_annotation.is_none() {
            self.contextual_parameter_type(parameter)
        } else {
            self.type_from_type_node(param.type_annotation)
        };
        if param.question_token {
            ty = self.types.union(&[ty, TypeId::UNDEFINED]);
        }
        (ty, param.question_token)
    }

    /// Unannotated arrow parameters take their type from the callback slot
    /// the arrow is passed into: in `a.map(val => ...)`, `val` gets the
    /// element type of `a`.
    fn contextual_parameter_type(&self, parameter: NodeIndex) -> TypeId {
        let arrow = self.arena.parent(parameter);
        let Some(arrow_node) = self.arena.get(arrow) else {
            return TypeId::ANY;
        };
        if arrow_node.kind != ARROW_FUNCTION {
            return TypeId::ANY;
        }
        // the arrow may sit inside parentheses in the argument list
        let mut argument = arrow;
        loop {
            let parent = self.arena.parent(argument);
            let Some(parent_node) = self.arena.get(parent) else {
                return TypeId::ANY;
            };
            if parent_node.kind == PARENTHESIZED_EXPRESSION {
                argument = parent;
                continue;
            }
            break;
        }
        let call_idx = self.arena.parent(argument);
        let Some(call) = self
            .arena
            .get(call_idx)
            .and_then(|n| self.arena.get_call_expr(n))
        else {
            return TypeId::ANY;
        };
        let Some(position) = call.arguments.nodes.iter().position(|&a| a == argument) else {
            return TypeId::ANY;
        };
        let Some(shape) = self.resolve_call_signature(call_idx) else {
            return TypeId::ANY;
        };
        let Some(slot) = shape.params.get(position) else {
            return TypeId::ANY;
        };
        let slot_type = strip_nullish(self.types, slot.type_id);
        let Some(signature) = first_call_signature(self.types, slot_type) else {
            return TypeId::ANY;
        };
        let callback = self.types.function_shape(signature);
        callback
            .params
            .first()
            .map(|p| p.type_id)
            .unwrap_or(TypeId::ANY)
    }

    fn type_of_property_access(&self, node: &Node) -> TypeId {
        let Some(access) = self.arena.get_access_expr(node) else {
            return TypeId::ERROR;
        };
        let receiver_raw = self.type_of_expression(access.expression);
        let receiver = strip_nullish(self.types, receiver_raw);
        let name = self.arena.identifier_text(access.name_or_argument);
        let mut result = if name == "length" && array_element_type(self.types, receiver).is_some() {
            TypeId::NUMBER
        } else {
            TypeId::ANY
        };
        if access.question_dot_token && !absence_flags(self.types, receiver_raw).is_empty() {
            result = self.types.union(&[result, TypeId::UNDEFINED]);
        }
        result
    }

    fn type_of_element_access(&self, node: &Node) -> TypeId {
        let Some(access) = self.arena.get_access_expr(node) else {
            return TypeId::ERROR;
        };
        let receiver_raw = self.type_of_expression(access.expression);
        let receiver = strip_nullish(self.types, receiver_raw);
        let mut result = array_element_type(self.types, receiver).unwrap_or(TypeId::ANY);
        if access.question_dot_token && !absence_flags(self.types, receiver_raw).is_empty() {
            result = self.types.union(&[result, TypeId::UNDEFINED]);
        }
        result
    }

    fn type_of_call(&self, call_idx: NodeIndex) -> TypeId {
        match self.resolve_call_signature(call_idx) {
            Some(shape) => shape.return_type,
            None => TypeId::ANY,
        }
    }

    fn type_of_arrow(&self, node: &Node) -> TypeId {
        let Some(arrow) = self.arena.get_arrow_function(node) else {
            return TypeId::ERROR;
        };
        let params: Vec<ParamInfo> = arrow
            .parameters
            .nodes
            .iter()
            .map(|&parameter| {
                let (type_id, optional) = self.parameter_type(parameter);
                let name = self
                    .arena
                    .get(parameter)
                    .and_then(|n| self.arena.get_parameter(n))
                    .map(|p| self.arena.identifier_atom(p.name))
                    .unwrap_or(Atom::NONE);
                ParamInfo {
                    name,
                    type_id,
                    optional,
                }
            })
            .collect();
        let return_type = self.type_of_expression(arrow.body);
        self.types.function(params, return_type)
    }

    /// Call signature of a call's callee, used both for return types and for
    /// classifying callback argument slots. `None` means the callee could
    /// not be resolved and the caller should stay quiet.
    pub fn resolve_call_signature(&self, call_idx: NodeIndex) -> Option<FunctionShape> {
        let call = self
            .arena
            .get(call_idx)
            .and_then(|n| self.arena.get_call_expr(n))?;
        let callee = self.arena.skip_parenthesized(call.expression);
        let callee_node = self.arena.get(callee)?;

        if callee_node.kind == SyntaxKind::Identifier as u16 {
            let atom = self.arena.identifier_atom(callee);
            let declaration = self.scopes.resolve(callee, atom)?;
            let decl_node = self.arena.get(declaration)?;
            if decl_node.kind == FUNCTION_DECLARATION {
                return Some(self.function_decl_shape(declaration));
            }
            let ty = strip_nullish(self.types, self.declaration_type(declaration));
            let signature = first_call_signature(self.types, ty)?;
            return Some(self.types.function_shape(signature));
        }

        if callee_node.kind == PROPERTY_ACCESS_EXPRESSION {
            let access = self.arena.get_access_expr(callee_node)?;
            let receiver_raw = self.type_of_expression(access.expression);
            let receiver = strip_nullish(self.types, receiver_raw);
            let element = array_element_type(self.types, receiver)?;
            let name = self.arena.identifier_text(access.name_or_argument);
            trace!(method = name, "array builtin lookup");
            return self.array_method_shape(name, element);
        }

        None
    }

    /// Signatures for the modeled `Array.prototype` methods.
    fn array_method_shape(&self, name: &str, element: TypeId) -> Option<FunctionShape> {
        let callback = |return_type: TypeId| ParamInfo {
            name: Atom::NONE,
            type_id: self.types.function(
                vec![ParamInfo {
                    name: Atom::NONE,
                    type_id: element,
                    optional: false,
                }],
                return_type,
            ),
            optional: false,
        };
        match name {
            "map" => Some(FunctionShape {
                params: vec![callback(TypeId::ANY)],
                return_type: self.types.array(TypeId::ANY),
            }),
            "forEach" => Some(FunctionShape {
                params: vec![callback(TypeId::VOID)],
                return_type: TypeId::VOID,
            }),
            "filter" => Some(FunctionShape {
                params: vec![callback(TypeId::BOOLEAN)],
                return_type: self.types.array(element),
            }),
            "at" => Some(FunctionShape {
                params: vec![ParamInfo {
                    name: Atom::NONE,
                    type_id: TypeId::NUMBER,
                    optional: false,
                }],
                return_type: self.types.union(&[element, TypeId::UNDEFINED]),
            }),
            _ => None,
        }
    }

    fn function_decl_shape(&self, declaration: NodeIndex) -> FunctionShape {
        let Some(func) = self
            .arena
            .get(declaration)
            .and_then(|n| self.arena.get_function_decl(n))
        else {
            return FunctionShape {
                params: Vec::new(),
                return_type: TypeId::ANY,
            };
        };
        let params: Vec<ParamInfo> = func
            .parameters
            .nodes
            .iter()
            .map(|&parameter| {
                let (type_id, optional) = self.parameter_type(parameter);
                let name = self
                    .arena
                    .get(parameter)
                    .and_then(|n| self.arena.get_parameter(n))
                    .map(|p| self.arena.identifier_atom(p.name))
                    .unwrap_or(Atom::NONE);
                ParamInfo {
                    name,
                    type_id,
                    optional,
                }
            })
            .collect();
        let return_type = if func.return_type.is_none() {
            TypeId::ANY
        } else {
            self.type_from_type_node(func.return_type)
        };
        FunctionShape {
            params,
            return_type,
        }
    }

    /// Resolve a type annotation node. Unknown named types come out as
    /// `any`, never as an error.
    pub fn type_from_type_node(&self, index: NodeIndex) -> TypeId {
        let Some(node) = self.arena.get(index) else {
            return TypeId::ANY;
        };
        match node.kind {
            TYPE_REFERENCE => {
                let Some(type_ref) = self.arena.get_type_ref(node) else {
                    return TypeId::ANY;
                };
                match self.arena.interner().resolve(type_ref.atom) {
                    "number" => TypeId::NUMBER,
                    "string" => TypeId::STRING,
                    "boolean" => TypeId::BOOLEAN,
                    "null" => TypeId::NULL,
                    "undefined" => TypeId::UNDEFINED,
                    "void" => TypeId::VOID,
                    "any" => TypeId::ANY,
                    "unknown" => TypeId::UNKNOWN,
                    "never" => TypeId::NEVER,
                    _ => TypeId::ANY,
                }
            }
            UNION_TYPE => {
                let Some(union) = self.arena.get_union_type(node) else {
                    return TypeId::ANY;
                };
                let members: Vec<TypeId> = union
                    .types
                    .nodes
                    .iter()
                    .map(|&member| self.type_from_type_node(member))
                    .collect();
                self.types.union(&members)
            }
            ARRAY_TYPE => {
                let Some(array) = self.arena.get_array_type(node) else {
                    return TypeId::ANY;
                };
                self.types.array(self.type_from_type_node(array.element_type))
            }
            FUNCTION_TYPE => {
                let Some(func) = self.arena.get_function_type(node) else {
                    return TypeId::ANY;
                };
                let params: Vec<ParamInfo> = func
                    .parameters
                    .nodes
                    .iter()
                    .map(|&parameter| {
                        let (type_id, optional) = self.parameter_type(parameter);
                        let name = self
                            .arena
                            .get(parameter)
                            .and_then(|n| self.arena.get_parameter(n))
                            .map(|p| self.arena.identifier_atom(p.name))
                            .unwrap_or(Atom::NONE);
                        ParamInfo {
                            name,
                            type_id,
                            optional,
                        }
                    })
                    .collect();
                let return_type = self.type_from_type_node(func.return_type);
                self.types.function(params, return_type)
            }
            PARENTHESIZED_TYPE => {
                let Some(wrapped) = self.arena.get_wrapped_type(node) else {
                    return TypeId::ANY;
                };
                self.type_from_type_node(wrapped.inner)
            }
            _ => TypeId::ANY,
        }
    }

    // =========================================================================
    // Narrowing
    // =========================================================================

    /// Subtract the nullish members that enclosing `!==` guards prove away.
    ///
    /// Guard and guarded expressions are compared by normalized text, so a
    /// guard on `a.at(0)` narrows `a[0]` and vice versa.
    fn apply_narrowing(&self, idx: NodeIndex, base: TypeId) -> TypeId {
        let flags = absence_flags(self.types, base);
        if flags.is_empty() {
            return base;
        }
        let key = normalized_expression_text(self.arena, self.source, idx);
        if key.is_empty() {
            return base;
        }
        let mut proven = AbsenceFlags::empty();
        let mut current = idx;
        for _ in 0..MAX_DEPTH {
            let parent = self.arena.parent(current);
            if parent.is_none() {
                break;
            }
            if let Some(parent_node) = self.arena.get(parent)
                && parent_node.kind == CONDITIONAL_EXPRESSION
                && let Some(cond) = self.arena.get_conditional_expr(parent_node)
                && cond.when_true == current
            {
                self.collect_guards(cond.condition, &key, &mut proven);
            }
            current = parent;
        }
        subtract_absence(self.types, base, proven & flags)
    }

    fn collect_guards(&self, condition: NodeIndex, key: &str, proven: &mut AbsenceFlags) {
        let idx = self.arena.skip_parenthesized(condition);
        let Some(binary) = self.arena.get(idx).and_then(|n| self.arena.get_binary_expr(n))
        else {
            return;
        };
        if binary.operator_token == SyntaxKind::AmpersandAmpersandToken as u16 {
            self.collect_guards(binary.left, key, proven);
            self.collect_guards(binary.right, key, proven);
            return;
        }
        if binary.operator_token != SyntaxKind::ExclamationEqualsEqualsToken as u16 {
            return;
        }
        for (expr, sentinel) in [
            (binary.left, binary.right),
            (binary.right, binary.left),
        ] {
            if let Some(flag) = self.sentinel_flag(sentinel)
                && normalized_expression_text(self.arena, self.source, expr) == key
            {
                *proven |= flag;
            }
        }
    }

    /// `null` or an unshadowed `undefined` on one side of a `!==`.
    fn sentinel_flag(&self, index: NodeIndex) -> Option<AbsenceFlags> {
        let idx = self.arena.skip_parenthesized(index);
        let node = self.arena.get(idx)?;
        if node.kind == SyntaxKind::NullKeyword as u16 {
            return Some(AbsenceFlags::NULL);
        }
        if node.kind == SyntaxKind::Identifier as u16
            && self.arena.identifier_text(idx) == "undefined"
            && self
                .scopes
                .resolve(idx, self.arena.identifier_atom(idx))
                .is_none()
        {
            return Some(AbsenceFlags::UNDEFINED);
        }
        None
    }
}
