//! Shadowing: the rule only fires on the global `Number`.

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
fn top_level_shadow_suppresses_the_rule() {
    let result = check("let Number: any;\nlet v: string | null;\nNumber(v);");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn ambient_function_shadow_suppresses_the_rule() {
    let result = check("declare function Number(x: string): number;\nNumber(null);");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn block_shadow_is_scoped() {
    let result = check("{\n  let Number: any;\n  Number(null);\n}\nNumber(null);");
    assert_eq!(result.diagnostics.len(), 1);
    // only the call outside the block is flagged
    let d = &result.diagnostics[0];
    assert!(d.start > 30);
}

#[test]
fn parameter_shadow_is_scoped_to_the_function() {
    let result = check("function f(Number: any) {\n  Number(null);\n}\nNumber(null);");
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn arrow_parameter_shadow_counts() {
    let result = check("let a: any[];\na.map(Number => Number(null));");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn outer_declarations_reach_nested_scopes() {
    let result = check("let Number: any;\nfunction f() {\n  {\n    Number(null);\n  }\n}");
    assert!(result.diagnostics.is_empty());
}
