//! Scenario A: direct `Number(x)` calls.

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
fn literal_null_is_flagged_without_fix() {
    let result = check("Number(null);");
    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert_eq!(d.code, 80010);
    assert!(d.message_text.contains("'null'"));
    assert!(d.suggestions.is_empty());
}

#[test]
fn literal_undefined_is_flagged_without_fix() {
    let result = check("Number(undefined);");
    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert_eq!(d.code, 80010);
    assert!(d.message_text.contains("'undefined'"));
    assert!(d.suggestions.is_empty());
}

#[test]
fn nullable_variable_gets_guard_fix() {
    let result = check("let v: string | null;\nNumber(v);");
    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert!(d.message_text.contains("string | null"));
    assert_eq!(d.suggestions.len(), 1);
    assert_eq!(d.suggestions[0].fix_name, "addNullishGuard");
    assert_eq!(d.suggestions[0].new_text, "v !== null ? Number(v) : null");
}

#[test]
fn optional_parameter_gets_undefined_guard() {
    let result = check("function f(x?: number) {\n  Number(x);\n}");
    assert_eq!(result.diagnostics.len(), 1);
    let d = &result.diagnostics[0];
    assert!(d.message_text.contains("number | undefined"));
    assert_eq!(
        d.suggestions[0].new_text,
        "x !== undefined ? Number(x) : undefined"
    );
}

#[test]
fn both_nullish_members_use_identity_else_branch() {
    let result = check("let v: string | null | undefined;\nNumber(v);");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].suggestions[0].new_text,
        "v !== null && v !== undefined ? Number(v) : v"
    );
}

#[test]
fn non_nullable_types_are_quiet() {
    assert!(check("let v: number = 5;\nNumber(v);").diagnostics.is_empty());
    assert!(check("let s: string;\nNumber(s);").diagnostics.is_empty());
    assert!(check("Number(42);").diagnostics.is_empty());
    assert!(check("Number('12');").diagnostics.is_empty());
}

#[test]
fn unresolved_and_any_stay_quiet() {
    // fail open: nothing is known about these values
    assert!(check("Number(mystery);").diagnostics.is_empty());
    assert!(check("let v: any;\nNumber(v);").diagnostics.is_empty());
    assert!(check("let v: unknown;\nNumber(v);").diagnostics.is_empty());
    assert!(check("let v;\nNumber(v);").diagnostics.is_empty());
}

#[test]
fn zero_and_multi_argument_calls_are_ignored() {
    assert!(check("Number();").diagnostics.is_empty());
    assert!(
        check("let v: string | null;\nNumber(v, v);")
            .diagnostics
            .is_empty()
    );
}

#[test]
fn parenthesized_argument_is_unwrapped() {
    let result = check("let v: number | null;\nNumber((v));");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].suggestions[0].new_text,
        "v !== null ? Number(v) : null"
    );
}

#[test]
fn number_passed_to_number_reports_nothing() {
    // the argument is a bare global Number, but scenario B never applies
    // inside a direct Number call
    assert!(check("Number(Number);").diagnostics.is_empty());
}

#[test]
fn declared_function_result_is_flagged_without_fix() {
    // a call expression cannot be repeated safely, so no suggestion
    let result = check("declare function find(): string | null;\nNumber(find());");
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].suggestions.is_empty());
}

#[test]
fn diagnostic_spans_cover_the_whole_call() {
    let source = "let v: string | null;\nNumber(v);";
    let result = check(source);
    let d = &result.diagnostics[0];
    let start = d.start as usize;
    let end = start + d.length as usize;
    assert_eq!(&source[start..end], "Number(v)");
}
