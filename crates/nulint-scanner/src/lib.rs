//! Tokenizer for the nulint analyzer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - token types (shared with the parser's node kinds)
//! - `ScannerState` - tokenizer state machine
//!
//! The scanner owns the string `Interner` while tokenizing; the parser takes
//! it over once the tree is built so identifier text stays resolvable.

use memchr::memchr;
use nulint_common::interner::{Atom, Interner};
use nulint_common::span::Span;
use serde::Serialize;

/// Token kinds for the analyzed TypeScript subset.
///
/// Values below 256 are tokens; the parser's composite node kinds live in
/// `syntax_kind_ext` and start above that range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFile,

    Identifier,
    NumericLiteral,
    StringLiteral,

    // Keywords
    NullKeyword,
    TrueKeyword,
    FalseKeyword,
    LetKeyword,
    ConstKeyword,
    VarKeyword,
    FunctionKeyword,
    DeclareKeyword,

    // Punctuation
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenBraceToken,
    CloseBraceToken,
    CommaToken,
    SemicolonToken,
    ColonToken,
    DotToken,
    QuestionDotToken,
    QuestionToken,
    BarToken,
    AmpersandAmpersandToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    EqualsToken,
}

impl SyntaxKind {
    /// Display text for punctuation tokens, used in parser diagnostics.
    pub const fn token_text(self) -> &'static str {
        match self {
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::DotToken => ".",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::BarToken => "|",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::Identifier => "identifier",
            _ => "",
        }
    }
}

/// Saved scanner position, for speculative parsing (arrow lookahead).
#[derive(Copy, Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_atom: Atom,
}

/// Tokenizer state machine over a single source text.
pub struct ScannerState<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_atom: Atom,
    interner: Interner,
}

impl<'a> ScannerState<'a> {
    pub fn new(source: &'a str) -> ScannerState<'a> {
        ScannerState {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_atom: Atom::NONE,
            interner: Interner::new(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Interned text of the current identifier/literal token.
    pub fn token_atom(&self) -> Atom {
        self.token_atom
    }

    pub fn token_span(&self) -> Span {
        Span::new(self.token_start as u32, self.pos as u32)
    }

    pub fn token_text(&self) -> &'a str {
        &self.source[self.token_start..self.pos]
    }

    /// Transfer ownership of the interner (called after parsing).
    pub fn take_interner(&mut self) -> Interner {
        std::mem::take(&mut self.interner)
    }

    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_atom: self.token_atom,
        }
    }

    /// Rewind to a previously captured position. The interner is append-only,
    /// so atoms interned during the abandoned speculation are harmless.
    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_atom = snapshot.token_atom;
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.token_start = self.pos;
        self.token_atom = Atom::NONE;

        let Some(&ch) = self.bytes.get(self.pos) else {
            self.token = SyntaxKind::EndOfFile;
            return self.token;
        };

        self.token = match ch {
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'|' => self.single(SyntaxKind::BarToken),
            b'.' => {
                if self
                    .bytes
                    .get(self.pos + 1)
                    .is_some_and(|c| c.is_ascii_digit())
                {
                    self.scan_number()
                } else {
                    self.single(SyntaxKind::DotToken)
                }
            }
            b'?' => {
                // `?.` is one token unless followed by a digit (`a ? .5 : b`).
                if self.bytes.get(self.pos + 1) == Some(&b'.')
                    && !self
                        .bytes
                        .get(self.pos + 2)
                        .is_some_and(|c| c.is_ascii_digit())
                {
                    self.pos += 2;
                    SyntaxKind::QuestionDotToken
                } else {
                    self.single(SyntaxKind::QuestionToken)
                }
            }
            b'&' => {
                if self.bytes.get(self.pos + 1) == Some(&b'&') {
                    self.pos += 2;
                    SyntaxKind::AmpersandAmpersandToken
                } else {
                    self.single(SyntaxKind::Unknown)
                }
            }
            b'!' => {
                if self.bytes.get(self.pos + 1) == Some(&b'=')
                    && self.bytes.get(self.pos + 2) == Some(&b'=')
                {
                    self.pos += 3;
                    SyntaxKind::ExclamationEqualsEqualsToken
                } else {
                    self.single(SyntaxKind::Unknown)
                }
            }
            b'=' => {
                if self.bytes.get(self.pos + 1) == Some(&b'=')
                    && self.bytes.get(self.pos + 2) == Some(&b'=')
                {
                    self.pos += 3;
                    SyntaxKind::EqualsEqualsEqualsToken
                } else if self.bytes.get(self.pos + 1) == Some(&b'>') {
                    self.pos += 2;
                    SyntaxKind::EqualsGreaterThanToken
                } else {
                    self.single(SyntaxKind::EqualsToken)
                }
            }
            b'"' | b'\'' => self.scan_string(ch),
            b'0'..=b'9' => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => {
                // Skip one byte so the parser always makes progress.
                self.pos += 1;
                SyntaxKind::Unknown
            }
        };
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.bytes.get(self.pos) {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.pos += 1,
                Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                    match memchr(b'\n', &self.bytes[self.pos..]) {
                        Some(offset) => self.pos += offset + 1,
                        None => self.pos = self.bytes.len(),
                    }
                }
                Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'*') => {
                    let mut cursor = self.pos + 2;
                    loop {
                        match memchr(b'*', &self.bytes[cursor..]) {
                            Some(offset) if self.bytes.get(cursor + offset + 1) == Some(&b'/') => {
                                self.pos = cursor + offset + 2;
                                break;
                            }
                            Some(offset) => cursor += offset + 1,
                            None => {
                                self.pos = self.bytes.len();
                                break;
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        let content_start = self.pos + 1;
        let mut cursor = content_start;
        // Fast path: find the closing quote, stepping over escapes.
        loop {
            match memchr(quote, &self.bytes[cursor..]) {
                Some(offset) => {
                    let candidate = cursor + offset;
                    if candidate > content_start && self.bytes[candidate - 1] == b'\\' {
                        cursor = candidate + 1;
                        continue;
                    }
                    let text = &self.source[content_start..candidate];
                    self.token_atom = self.interner.intern(text);
                    self.pos = candidate + 1;
                    return SyntaxKind::StringLiteral;
                }
                None => {
                    // Unterminated string: consume to end of input.
                    let text = &self.source[content_start..];
                    self.token_atom = self.interner.intern(text);
                    self.pos = self.bytes.len();
                    return SyntaxKind::StringLiteral;
                }
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        while self.bytes.get(self.pos).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.bytes.get(self.pos) == Some(&b'.')
            && self
                .bytes
                .get(self.pos + 1)
                .is_some_and(|c| c.is_ascii_digit())
        {
            self.pos += 1;
            while self.bytes.get(self.pos).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let text = &self.source[self.token_start..self.pos];
        self.token_atom = self.interner.intern(text);
        SyntaxKind::NumericLiteral
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|&c| is_identifier_part(c))
        {
            self.pos += 1;
        }
        let text = &self.source[self.token_start..self.pos];
        match text {
            "null" => SyntaxKind::NullKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "let" => SyntaxKind::LetKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "var" => SyntaxKind::VarKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "declare" => SyntaxKind::DeclareKeyword,
            _ => {
                self.token_atom = self.interner.intern(text);
                SyntaxKind::Identifier
            }
        }
    }
}

const fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

const fn is_identifier_part(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let mut scanner = ScannerState::new(source);
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFile {
                break;
            }
            out.push(kind);
        }
        out
    }

    #[test]
    fn scans_call_with_null_argument() {
        assert_eq!(
            kinds("Number(null)"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::OpenParenToken,
                SyntaxKind::NullKeyword,
                SyntaxKind::CloseParenToken,
            ]
        );
    }

    #[test]
    fn scans_optional_chain_and_strict_inequality() {
        assert_eq!(
            kinds("a?.at(0) !== undefined"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::QuestionDotToken,
                SyntaxKind::Identifier,
                SyntaxKind::OpenParenToken,
                SyntaxKind::NumericLiteral,
                SyntaxKind::CloseParenToken,
                SyntaxKind::ExclamationEqualsEqualsToken,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn question_before_decimal_is_not_optional_chain() {
        assert_eq!(
            kinds("x ? .5 : y"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::QuestionToken,
                SyntaxKind::NumericLiteral,
                SyntaxKind::ColonToken,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn skips_comments_and_scans_arrow() {
        assert_eq!(
            kinds("// line\n/* block */ val => val"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::EqualsGreaterThanToken,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn snapshot_restore_rewinds() {
        let mut scanner = ScannerState::new("a => b");
        scanner.scan();
        let snap = scanner.snapshot();
        assert_eq!(scanner.scan(), SyntaxKind::EqualsGreaterThanToken);
        scanner.restore(snap);
        assert_eq!(scanner.token(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::EqualsGreaterThanToken);
    }
}
