//! Source spans as byte offsets into the original text.

use serde::Serialize;

/// Half-open byte range `[start, end)` into a source file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Span {
        Span { start, end }
    }

    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Slice the original source text covered by this span.
    pub fn text(self, source: &str) -> &str {
        let start = self.start as usize;
        let end = (self.end as usize).min(source.len());
        if start >= end { "" } else { &source[start..end] }
    }
}
