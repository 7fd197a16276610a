//! Strict-equality narrowing, and the idempotence it buys: applying a
//! suggested fix and re-analyzing must produce no further diagnostics.

use nulint_checker::{AnalysisResult, analyze};
use nulint_common::diagnostics::Suggestion;

fn check(source: &str) -> AnalysisResult {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let result = analyze("input.ts", source);
    assert!(
        result.parse_diagnostics.is_empty(),
        "unexpected parse errors: {:?}",
        result.parse_diagnostics
    );
    result
}

fn apply(source: &str, suggestion: &Suggestion) -> String {
    let start = suggestion.span.start as usize;
    let end = suggestion.span.end as usize;
    format!("{}{}{}", &source[..start], suggestion.new_text, &source[end..])
}

/// Apply the single expected fix and assert the result is clean.
fn assert_fix_is_idempotent(source: &str) {
    let result = check(source);
    assert_eq!(result.diagnostics.len(), 1, "{:?}", result.diagnostics);
    assert_eq!(result.diagnostics[0].suggestions.len(), 1);
    let fixed = apply(source, &result.diagnostics[0].suggestions[0]);
    let reanalyzed = check(&fixed);
    assert!(
        reanalyzed.diagnostics.is_empty(),
        "fix was not idempotent.\nfixed source: {fixed}\ndiagnostics: {:?}",
        reanalyzed.diagnostics
    );
}

#[test]
fn guarded_conversion_is_already_quiet() {
    let result = check("let v: string | null;\nv !== null ? Number(v) : null;");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn reversed_operand_order_also_narrows() {
    let result = check("let v: string | null;\nnull !== v ? Number(v) : null;");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn conjunction_guards_narrow_both_members() {
    let result = check(
        "let v: string | null | undefined;\nv !== null && v !== undefined ? Number(v) : v;",
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn partial_guard_still_reports_the_remaining_member() {
    // only null is guarded; undefined can still reach the conversion
    let result = check("let v: string | null | undefined;\nv !== null ? Number(v) : null;");
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message_text.contains("undefined"));
}

#[test]
fn guard_on_a_different_expression_does_not_narrow() {
    let result = check(
        "let v: string | null;\nlet w: string | null;\nw !== null ? Number(v) : null;",
    );
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn else_branch_is_not_narrowed() {
    let result = check("let v: string | null;\nv !== null ? v : Number(v);");
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn direct_fix_is_idempotent() {
    assert_fix_is_idempotent("let v: string | null;\nNumber(v);");
}

#[test]
fn undefined_fix_is_idempotent() {
    assert_fix_is_idempotent("function f(x?: number) {\n  Number(x);\n}");
}

#[test]
fn both_member_fix_is_idempotent() {
    assert_fix_is_idempotent("let v: string | null | undefined;\nNumber(v);");
}

#[test]
fn element_access_fix_is_idempotent() {
    assert_fix_is_idempotent("let a: (string | null)[];\nNumber(a[0]);");
}

#[test]
fn at_zero_fix_is_idempotent() {
    // the guard keeps a.at(0) while the conversion uses a[0]; narrowing
    // treats them as the same value
    assert_fix_is_idempotent("let a: (string | null)[];\nNumber(a.at(0));");
}

#[test]
fn callback_fix_is_idempotent() {
    assert_fix_is_idempotent("let a: (string | null)[];\na.map(Number);");
}

#[test]
fn for_each_callback_fix_is_idempotent() {
    assert_fix_is_idempotent("let a: (number | undefined)[];\na.forEach(Number);");
}
