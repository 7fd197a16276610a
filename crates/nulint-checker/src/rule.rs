//! The unsafe-`Number`-conversion rule.
//!
//! Two scenarios, mutually exclusive per call expression:
//!
//! * direct: `Number(x)` where `x` may be `null` or `undefined`, including
//!   the literal forms `Number(null)` and `Number(undefined)`;
//! * callback: a bare `Number` passed as an argument into a slot whose
//!   resolved callback parameter may be nullish, e.g. `values.map(Number)`.
//!
//! Both require `Number` to resolve to the global: a user declaration named
//! `Number` anywhere in scope suppresses the rule.

use nulint_common::diagnostics::{Diagnostic, diagnostic_messages};
use nulint_parser::syntax_kind_ext::*;
use nulint_parser::{NodeArena, NodeIndex};
use nulint_scanner::SyntaxKind;
use nulint_solver::{TypeFormatter, TypeInterner, absence_flags, first_call_signature, strip_nullish};
use tracing::debug;

use crate::fix;
use crate::infer::TypeResolver;
use crate::scopes::ScopeTree;

pub fn check_source_file(
    file_name: &str,
    source: &str,
    arena: &NodeArena,
    scopes: &ScopeTree,
    types: &TypeInterner,
) -> Vec<Diagnostic> {
    let resolver = TypeResolver::new(arena, types, scopes, source);
    let formatter = TypeFormatter::new(types, arena.interner());
    let mut diagnostics = Vec::new();

    for raw in 0..arena.node_count() {
        let call_idx = NodeIndex(raw as u32);
        let Some(node) = arena.get(call_idx) else {
            continue;
        };
        if node.kind != CALL_EXPRESSION {
            continue;
        }
        let Some(call) = arena.get_call_expr(node) else {
            continue;
        };

        let callee = arena.skip_parenthesized(call.expression);
        if is_global_number(arena, scopes, callee) {
            check_direct_call(
                file_name,
                source,
                arena,
                scopes,
                types,
                &resolver,
                &formatter,
                call_idx,
                &mut diagnostics,
            );
            continue;
        }

        for (position, &argument) in call.arguments.nodes.iter().enumerate() {
            let unwrapped = arena.skip_parenthesized(argument);
            if !is_global_number(arena, scopes, unwrapped) {
                continue;
            }
            check_callback_argument(
                file_name,
                arena,
                types,
                &resolver,
                &formatter,
                call_idx,
                argument,
                position,
                &mut diagnostics,
            );
        }
    }

    diagnostics.sort_by_key(|d| d.start);
    diagnostics
}

/// An identifier `Number` with no user declaration in any enclosing scope.
fn is_global_number(arena: &NodeArena, scopes: &ScopeTree, index: NodeIndex) -> bool {
    let Some(node) = arena.get(index) else {
        return false;
    };
    if node.kind != SyntaxKind::Identifier as u16 {
        return false;
    }
    let atom = arena.identifier_atom(index);
    arena.interner().resolve(atom) == "Number" && scopes.resolve(index, atom).is_none()
}

#[allow(clippy::too_many_arguments)]
fn check_direct_call(
    file_name: &str,
    source: &str,
    arena: &NodeArena,
    scopes: &ScopeTree,
    types: &TypeInterner,
    resolver: &TypeResolver<'_>,
    formatter: &TypeFormatter<'_>,
    call_idx: NodeIndex,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(node) = arena.get(call_idx) else {
        return;
    };
    let Some(call) = arena.get_call_expr(node) else {
        return;
    };
    // Number() and multi-argument calls are out of scope
    if call.arguments.len() != 1 {
        return;
    }
    let argument = call.arguments.nodes[0];
    let unwrapped = arena.skip_parenthesized(argument);
    let Some(arg_node) = arena.get(unwrapped) else {
        return;
    };

    // literal null / undefined: always flagged, never fixed, since the
    // conversion result is a constant the author should write directly
    if arg_node.kind == SyntaxKind::NullKeyword as u16 {
        debug!(start = node.span.start, "Number(null)");
        diagnostics.push(Diagnostic::new(
            diagnostic_messages::UNSAFE_NUMBER_CONVERSION,
            file_name,
            node.span,
            &["null"],
        ));
        return;
    }
    if arg_node.kind == SyntaxKind::Identifier as u16
        && arena.identifier_text(unwrapped) == "undefined"
        && scopes
            .resolve(unwrapped, arena.identifier_atom(unwrapped))
            .is_none()
    {
        debug!(start = node.span.start, "Number(undefined)");
        diagnostics.push(Diagnostic::new(
            diagnostic_messages::UNSAFE_NUMBER_CONVERSION,
            file_name,
            node.span,
            &["undefined"],
        ));
        return;
    }

    let ty = resolver.type_of_expression(argument);
    let flags = absence_flags(types, ty);
    if flags.is_empty() {
        return;
    }
    let formatted = formatter.format(ty);
    debug!(start = node.span.start, ty = %formatted, "unsafe Number conversion");
    let mut diagnostic = Diagnostic::new(
        diagnostic_messages::UNSAFE_NUMBER_CONVERSION,
        file_name,
        node.span,
        &[&formatted],
    );
    if let Some(suggestion) = fix::synthesize_direct(arena, source, argument, flags, node.span) {
        diagnostic = diagnostic.with_suggestion(suggestion);
    }
    diagnostics.push(diagnostic);
}

#[allow(clippy::too_many_arguments)]
fn check_callback_argument(
    file_name: &str,
    arena: &NodeArena,
    types: &TypeInterner,
    resolver: &TypeResolver<'_>,
    formatter: &TypeFormatter<'_>,
    call_idx: NodeIndex,
    argument: NodeIndex,
    position: usize,
    diagnostics: &mut Vec<Diagnostic>,
) {
    // fail open at every unresolved step
    let Some(shape) = resolver.resolve_call_signature(call_idx) else {
        return;
    };
    let Some(slot) = shape.params.get(position) else {
        return;
    };
    let slot_type = strip_nullish(types, slot.type_id);
    let Some(signature) = first_call_signature(types, slot_type) else {
        return;
    };
    let callback = types.function_shape(signature);
    let Some(first_param) = callback.params.first() else {
        return;
    };
    let flags = absence_flags(types, first_param.type_id);
    if flags.is_empty() {
        return;
    }
    let Some(arg_node) = arena.get(argument) else {
        return;
    };
    let formatted = formatter.format(first_param.type_id);
    debug!(start = arg_node.span.start, ty = %formatted, "unsafe Number callback");
    diagnostics.push(
        Diagnostic::new(
            diagnostic_messages::UNSAFE_NUMBER_CALLBACK,
            file_name,
            arg_node.span,
            &[&formatted],
        )
        .with_suggestion(fix::synthesize_callback(flags, arg_node.span)),
    );
}
