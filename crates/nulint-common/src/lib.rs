//! Common types and utilities for the nulint analyzer.
//!
//! This crate provides foundational types used across all nulint crates:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`)
//! - Diagnostics and suggested fixes (`Diagnostic`, `Suggestion`)

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostics and the code-fix protocol types
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, Suggestion, format_message,
};
