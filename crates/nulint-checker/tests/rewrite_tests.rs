//! Rewrite shapes: which expressions get a fix, and what text it carries.

use nulint_checker::{AnalysisResult, analyze};
use nulint_common::diagnostics::Diagnostic;

fn check(source: &str) -> AnalysisResult {
    let result = analyze("input.ts", source);
    assert!(
        result.parse_diagnostics.is_empty(),
        "unexpected parse errors: {:?}",
        result.parse_diagnostics
    );
    result
}

fn single_fix_text(result: &AnalysisResult) -> &str {
    assert_eq!(result.diagnostics.len(), 1, "{:?}", result.diagnostics);
    let d = &result.diagnostics[0];
    assert_eq!(d.suggestions.len(), 1, "{:?}", d);
    &d.suggestions[0].new_text
}

#[test]
fn element_access_is_repeatable() {
    let result = check("let a: (string | null)[];\nNumber(a[0]);");
    assert_eq!(single_fix_text(&result), "a[0] !== null ? Number(a[0]) : null");
}

#[test]
fn optional_property_chains_are_repeatable() {
    // o?.length is number | undefined when o itself may be null
    let result = check("let o: string[] | null;\nNumber(o?.length);");
    assert_eq!(
        single_fix_text(&result),
        "o?.length !== undefined ? Number(o?.length) : undefined"
    );
}

#[test]
fn at_zero_normalizes_to_index_in_the_converted_copy() {
    let result = check("let a: (string | null)[];\nNumber(a.at(0));");
    // .at(0) yields element | undefined, so both guards appear; the guarded
    // copies keep the original call while the conversion indexes directly
    assert_eq!(
        single_fix_text(&result),
        "a.at(0) !== null && a.at(0) !== undefined ? Number(a[0]) : a.at(0)"
    );
}

#[test]
fn optional_chain_at_zero_keeps_the_question_dot() {
    let result = check("let a: (string | null)[] | null;\nNumber(a?.at(0));");
    assert_eq!(
        single_fix_text(&result),
        "a?.at(0) !== null && a?.at(0) !== undefined ? Number(a?.[0]) : a?.at(0)"
    );
}

#[test]
fn call_results_get_no_fix() {
    // repeating the call in a guard could double a side effect
    let result = check("declare function next(): number | undefined;\nNumber(next());");
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].suggestions.is_empty());
}

#[test]
fn at_with_other_indices_is_not_normalized() {
    // only .at(0) has a direct [0] equivalent in the rewrite
    let result = check("let a: (string | null)[];\nNumber(a.at(1));");
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].suggestions.is_empty());
}

#[test]
fn fix_replaces_exactly_the_call_span() {
    let source = "let v: string | null;\nNumber(v);";
    let result = check(source);
    let suggestion = &result.diagnostics[0].suggestions[0];
    assert_eq!(
        &source[suggestion.span.start as usize..suggestion.span.end as usize],
        "Number(v)"
    );
}

#[test]
fn suggestions_serialize_with_camel_case_keys() {
    let result = check("let v: string | null;\nNumber(v);");
    let value = serde_json::to_value(&result.diagnostics[0].suggestions[0]).unwrap();
    assert_eq!(value["fixName"], "addNullishGuard");
    assert!(value["newText"].as_str().unwrap().contains("Number(v)"));
    assert!(value["span"]["start"].is_number());
}

#[test]
fn diagnostics_are_ordered_by_position() {
    let source = "let v: string | null;\nNumber(v);\nlet a: (string | null)[];\na.map(Number);";
    let result = check(source);
    assert_eq!(result.diagnostics.len(), 2);
    let starts: Vec<u32> = result.diagnostics.iter().map(|d: &Diagnostic| d.start).collect();
    assert!(starts[0] < starts[1]);
    assert_eq!(result.diagnostics[0].code, 80010);
    assert_eq!(result.diagnostics[1].code, 80011);
}
