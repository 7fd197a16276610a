//! Rewrite synthesis.
//!
//! Diagnostics carry a machine-applicable suggestion when the flagged
//! expression has a shape we can safely repeat: an identifier, a property or
//! element access chain (optional links allowed), or an `.at(0)` call on such
//! a chain. Anything with a call or other side effect in it gets a
//! diagnostic without a fix, since the guard would evaluate it twice.
//!
//! The guarded copy keeps the original text; the converted copy rewrites
//! `.at(0)` to `[0]` (and `?.at(0)` to `?.[0]`) so the fixed code indexes
//! directly instead of re-invoking the method.

use nulint_common::diagnostics::Suggestion;
use nulint_common::span::Span;
use nulint_parser::syntax_kind_ext::*;
use nulint_parser::{NodeArena, NodeIndex};
use nulint_scanner::SyntaxKind;
use nulint_solver::AbsenceFlags;

pub const FIX_ADD_NULLISH_GUARD: &str = "addNullishGuard";
pub const FIX_WRAP_NUMBER_CALLBACK: &str = "wrapNumberCallback";

/// If `index` is a call of the form `recv.at(0)` or `recv?.at(0)`, return
/// the receiver access node.
fn at_zero_receiver(arena: &NodeArena, index: NodeIndex) -> Option<NodeIndex> {
    let call = arena.get_call_expr(arena.get(index)?)?;
    if call.arguments.len() != 1 {
        return None;
    }
    let callee = arena.get(call.expression)?;
    if callee.kind != PROPERTY_ACCESS_EXPRESSION {
        return None;
    }
    let access = arena.get_access_expr(callee)?;
    if arena.identifier_text(access.name_or_argument) != "at" {
        return None;
    }
    let argument = arena.get(*call.arguments.nodes.first()?)?;
    if argument.kind != SyntaxKind::NumericLiteral as u16 {
        return None;
    }
    let literal = arena.get_literal(argument)?;
    if arena.interner().resolve(literal.atom) != "0" {
        return None;
    }
    Some(call.expression)
}

/// Whether an expression may be repeated inside a guard without changing
/// behavior.
fn is_repeatable(arena: &NodeArena, index: NodeIndex) -> bool {
    let idx = arena.skip_parenthesized(index);
    let Some(node) = arena.get(idx) else {
        return false;
    };
    if node.kind == SyntaxKind::Identifier as u16 {
        return arena.identifier_atom(idx) != nulint_common::interner::Atom::NONE;
    }
    if node.kind == PROPERTY_ACCESS_EXPRESSION {
        let Some(access) = arena.get_access_expr(node) else {
            return false;
        };
        return is_repeatable(arena, access.expression);
    }
    if node.kind == ELEMENT_ACCESS_EXPRESSION {
        let Some(access) = arena.get_access_expr(node) else {
            return false;
        };
        // index expression is evaluated twice as well
        return is_repeatable(arena, access.expression)
            && is_repeatable_index(arena, access.name_or_argument);
    }
    if node.kind == CALL_EXPRESSION
        && let Some(receiver) = at_zero_receiver(arena, idx)
        && let Some(receiver_node) = arena.get(receiver)
        && let Some(access) = arena.get_access_expr(receiver_node)
    {
        return is_repeatable(arena, access.expression);
    }
    false
}

fn is_repeatable_index(arena: &NodeArena, index: NodeIndex) -> bool {
    let idx = arena.skip_parenthesized(index);
    let Some(node) = arena.get(idx) else {
        return false;
    };
    node.kind == SyntaxKind::NumericLiteral as u16
        || node.kind == SyntaxKind::StringLiteral as u16
        || is_repeatable(arena, idx)
}

/// Source text of an expression with `.at(0)` links rewritten to `[0]`.
/// Used both for the converted copy of a fix and as the key under which
/// strict-equality guards narrow, so `a.at(0)` and `a[0]` narrow together.
pub fn normalized_expression_text(arena: &NodeArena, source: &str, index: NodeIndex) -> String {
    let idx = arena.skip_parenthesized(index);
    let Some(node) = arena.get(idx) else {
        return String::new();
    };
    match node.kind {
        CALL_EXPRESSION => {
            if let Some(receiver) = at_zero_receiver(arena, idx)
                && let Some(access_node) = arena.get(receiver)
                && let Some(access) = arena.get_access_expr(access_node)
            {
                let base = normalized_expression_text(arena, source, access.expression);
                if access.question_dot_token {
                    return format!("{base}?.[0]");
                }
                return format!("{base}[0]");
            }
            node.span.text(source).to_string()
        }
        PROPERTY_ACCESS_EXPRESSION => {
            let Some(access) = arena.get_access_expr(node) else {
                return String::new();
            };
            let base = normalized_expression_text(arena, source, access.expression);
            let name = arena.identifier_text(access.name_or_argument);
            if access.question_dot_token {
                format!("{base}?.{name}")
            } else {
                format!("{base}.{name}")
            }
        }
        ELEMENT_ACCESS_EXPRESSION => {
            let Some(access) = arena.get_access_expr(node) else {
                return String::new();
            };
            let base = normalized_expression_text(arena, source, access.expression);
            let argument = normalized_expression_text(arena, source, access.name_or_argument);
            if access.question_dot_token {
                format!("{base}?.[{argument}]")
            } else {
                format!("{base}[{argument}]")
            }
        }
        _ => node.span.text(source).to_string(),
    }
}

/// Guard + convert rewrite for a direct `Number(x)` call. `None` when the
/// argument is not a repeatable shape.
pub fn synthesize_direct(
    arena: &NodeArena,
    source: &str,
    argument: NodeIndex,
    flags: AbsenceFlags,
    call_span: Span,
) -> Option<Suggestion> {
    if !is_repeatable(arena, argument) {
        return None;
    }
    let idx = arena.skip_parenthesized(argument);
    let original = arena.get(idx)?.span.text(source);
    let converted = normalized_expression_text(arena, source, idx);

    let new_text = if flags.contains(AbsenceFlags::NULL | AbsenceFlags::UNDEFINED) {
        format!(
            "{original} !== null && {original} !== undefined ? Number({converted}) : {original}"
        )
    } else if flags.contains(AbsenceFlags::NULL) {
        format!("{original} !== null ? Number({converted}) : null")
    } else {
        format!("{original} !== undefined ? Number({converted}) : undefined")
    };

    Some(Suggestion {
        fix_name: FIX_ADD_NULLISH_GUARD,
        description: format!("Guard '{original}' against nullish values before converting"),
        span: call_span,
        new_text,
    })
}

/// Arrow-function replacement for a bare `Number` callback argument.
pub fn synthesize_callback(flags: AbsenceFlags, argument_span: Span) -> Suggestion {
    let new_text = if flags.contains(AbsenceFlags::NULL | AbsenceFlags::UNDEFINED) {
        "val => val !== null && val !== undefined ? Number(val) : val".to_string()
    } else if flags.contains(AbsenceFlags::NULL) {
        "val => val !== null ? Number(val) : null".to_string()
    } else {
        "val => val !== undefined ? Number(val) : undefined".to_string()
    };
    Suggestion {
        fix_name: FIX_WRAP_NUMBER_CALLBACK,
        description: "Wrap 'Number' in an arrow function that guards nullish values".to_string(),
        span: argument_span,
        new_text,
    }
}
