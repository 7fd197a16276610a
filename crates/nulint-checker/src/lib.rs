//! Analyzer entry point: parse, bind, and lint one source file.
//!
//! ```
//! let result = nulint_checker::analyze("input.ts", "let v: string | null; Number(v);");
//! assert_eq!(result.diagnostics.len(), 1);
//! assert_eq!(result.diagnostics[0].code, 80010);
//! ```

pub mod fix;
pub mod infer;
pub mod rule;
pub mod scopes;

use nulint_common::diagnostics::Diagnostic;
use nulint_parser::parse_source_file;
use nulint_solver::TypeInterner;
use tracing::debug;

use crate::scopes::ScopeTree;

pub struct AnalysisResult {
    pub file_name: String,
    /// Lint diagnostics, ordered by start offset.
    pub diagnostics: Vec<Diagnostic>,
    /// Syntax errors from parsing. Lint results on a file with parse errors
    /// are best-effort.
    pub parse_diagnostics: Vec<Diagnostic>,
}

/// Analyze one file's source text.
pub fn analyze(file_name: &str, source: &str) -> AnalysisResult {
    let parsed = parse_source_file(file_name, source);
    let scopes = ScopeTree::bind(&parsed.arena, parsed.root);
    let types = TypeInterner::new();
    let diagnostics = rule::check_source_file(file_name, source, &parsed.arena, &scopes, &types);
    debug!(
        file = file_name,
        diagnostics = diagnostics.len(),
        parse_errors = parsed.diagnostics.len(),
        "analysis complete"
    );
    AnalysisResult {
        file_name: file_name.to_string(),
        diagnostics,
        parse_diagnostics: parsed.diagnostics,
    }
}
