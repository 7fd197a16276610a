//! Scenario B: a bare `Number` passed as a callback argument.

use nulint_checker::{AnalysisResult, analyze};

fn check(source: &str) -> AnalysisResult {
    let result = analyze("input.ts", source);
    assert!(
        result.parse_diagnostics.is_empty(),
        "unexpected parse errors: {:?}",
        result.parse_diagnostics
    );
    result
}

#[test]
fn map_over_nullable_elements_is_flagged() {
    let source = "let a: (string | null)[];\na.map(Number);";
    let result = check(source);
    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert_eq!(d.code, 80011);
    assert!(d.message_text.contains("string | null"));
    assert_eq!(d.suggestions.len(), 1);
    assert_eq!(d.suggestions[0].fix_name, "wrapNumberCallback");
    assert_eq!(
        d.suggestions[0].new_text,
        "val => val !== null ? Number(val) : null"
    );
    // the fix replaces just the Number argument
    let span = d.suggestions[0].span;
    assert_eq!(&source[span.start as usize..span.end as usize], "Number");
}

#[test]
fn for_each_undefined_elements_use_undefined_guard() {
    let result = check("let a: (number | undefined)[];\na.forEach(Number);");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].suggestions[0].new_text,
        "val => val !== undefined ? Number(val) : undefined"
    );
}

#[test]
fn both_nullish_members_preserve_the_value() {
    let result = check("let a: (string | null | undefined)[];\na.map(Number);");
    assert_eq!(
        result.diagnostics[0].suggestions[0].new_text,
        "val => val !== null && val !== undefined ? Number(val) : val"
    );
}

#[test]
fn declared_function_slots_are_resolved() {
    let result = check(
        "declare function run(cb: (x: number | null) => number): void;\nrun(Number);",
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, 80011);
    assert!(result.diagnostics[0].message_text.contains("number | null"));
}

#[test]
fn optional_callback_slots_look_through_undefined() {
    // cb?: adds | undefined to the slot; the callback signature is behind it
    let result = check(
        "declare function run(cb?: (x: string | undefined) => number): void;\nrun(Number);",
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].message_text.contains("string | undefined"));
}

#[test]
fn later_argument_positions_use_their_own_slot() {
    let result = check(
        "declare function fold(seed: number, cb: (x: number | undefined) => number): void;\nfold(0, Number);",
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, 80011);
}

#[test]
fn safe_element_types_are_quiet() {
    assert!(check("let a: string[];\na.map(Number);").diagnostics.is_empty());
    assert!(check("let a: number[];\na.forEach(Number);").diagnostics.is_empty());
}

#[test]
fn unresolvable_callees_fail_open() {
    assert!(check("mystery(Number);").diagnostics.is_empty());
    // slot index out of range of the known signature
    assert!(
        check("declare function one(cb: (x: number | null) => number): void;\none(Number, Number);")
            .diagnostics
            .len()
            == 1
    );
}

#[test]
fn non_callback_slots_are_quiet() {
    // the slot is a plain value type, not a callable
    assert!(
        check("declare function log(value: string | null): void;\nlog(Number);")
            .diagnostics
            .is_empty()
    );
}

#[test]
fn shadowed_number_arguments_are_not_callbacks() {
    let result = check("let a: (string | null)[];\n{\n  let Number = 5;\n  a.map(Number);\n}");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn parenthesized_number_argument_is_recognized() {
    let result = check("let a: (string | null)[];\na.map((Number));");
    assert_eq!(result.diagnostics.len(), 1);
}
