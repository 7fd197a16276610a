//! Diagnostics and suggested fixes.
//!
//! A `Diagnostic` is a reported problem anchored at a source span; it carries
//! zero or one `Suggestion` with an exact replacement text. Suggestions are
//! serializable so a host (editor plugin, CI reporter) can apply them.

use crate::span::Span;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

/// Static message template with its diagnostic code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage};

    /// Scenario A: a direct `Number(...)` call whose argument may be nullish.
    pub const UNSAFE_NUMBER_CONVERSION: DiagnosticMessage = DiagnosticMessage {
        code: 80010,
        category: DiagnosticCategory::Warning,
        message: "Unsafe 'Number' conversion of a value of type '{0}': 'Number' silently turns null into 0 and undefined into NaN.",
    };

    /// Scenario B: `Number` passed by reference into a callback slot whose
    /// parameter type admits a nullish value.
    pub const UNSAFE_NUMBER_CALLBACK: DiagnosticMessage = DiagnosticMessage {
        code: 80011,
        category: DiagnosticCategory::Warning,
        message: "Passing 'Number' as a callback is unsafe here: it will be invoked with values of type '{0}'.",
    };

    /// Parser recovery: a required token was missing.
    pub const EXPECTED_TOKEN: DiagnosticMessage = DiagnosticMessage {
        code: 1005,
        category: DiagnosticCategory::Error,
        message: "'{0}' expected.",
    };

    /// Parser recovery: a token could not start an expression or statement.
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = DiagnosticMessage {
        code: 1109,
        category: DiagnosticCategory::Error,
        message: "Expression expected.",
    };
}

/// An exact replacement offered alongside a diagnostic.
///
/// The replacement is guaranteed semantically equivalent to "if absent,
/// preserve absence; else convert" for the checked expression's declared type,
/// provided that expression is referentially transparent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Internal fix name (e.g. "addNullishGuard"), for fix-all grouping.
    pub fix_name: &'static str,
    /// Human-readable description of the fix.
    pub description: String,
    /// Span of the node the new text replaces.
    pub span: Span,
    pub new_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(
        message: DiagnosticMessage,
        file: impl Into<String>,
        span: Span,
        args: &[&str],
    ) -> Diagnostic {
        Diagnostic {
            category: message.category,
            code: message.code,
            file: file.into(),
            start: span.start,
            length: span.len(),
            message_text: format_message(message.message, args),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Diagnostic {
        self.suggestions.push(suggestion);
        self
    }
}

/// Substitute `{0}`, `{1}`, ... placeholders in a message template.
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
