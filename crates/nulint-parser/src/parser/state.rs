//! Recursive-descent parser for the analyzed TypeScript subset.
//!
//! The grammar covers what the lint needs to see, including its own
//! rewritten output: variable statements with type annotations,
//! `function`/`declare function` declarations, blocks, call/member/element
//! chains with optional chaining, strict (in)equality, `&&`, conditional
//! expressions, and single-parameter arrow functions.
//!
//! Errors are collected as diagnostics and the parser recovers by skipping
//! a token, so a best-effort tree is always produced.

use super::base::{NodeIndex, NodeList};
use super::node::NodeArena;
use nulint_common::diagnostics::{Diagnostic, diagnostic_messages};
use nulint_common::interner::Atom;
use nulint_common::span::Span;
use nulint_scanner::{ScannerSnapshot, ScannerState, SyntaxKind};
use tracing::trace;

pub struct ParseResult {
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse one source file into an arena-backed tree.
pub fn parse_source_file(file_name: &str, source: &str) -> ParseResult {
    let mut parser = ParserState::new(file_name, source);
    let root = parser.parse_source_file();
    let ParserState {
        mut scanner,
        mut arena,
        diagnostics,
        ..
    } = parser;
    arena.set_interner(scanner.take_interner());
    trace!(
        nodes = arena.node_count(),
        errors = diagnostics.len(),
        "parse_source_file complete"
    );
    ParseResult {
        arena,
        root,
        diagnostics,
    }
}

struct ParserState<'a> {
    scanner: ScannerState<'a>,
    arena: NodeArena,
    diagnostics: Vec<Diagnostic>,
    file_name: &'a str,
    last_token_end: u32,
}

/// Saved parser position for speculative parses (arrow/function-type
/// lookahead). Restoring also drops diagnostics raised during speculation.
struct ParserSnapshot {
    scanner: ScannerSnapshot,
    last_token_end: u32,
    diagnostics_len: usize,
}

impl<'a> ParserState<'a> {
    fn new(file_name: &'a str, source: &'a str) -> ParserState<'a> {
        let mut scanner = ScannerState::new(source);
        scanner.scan();
        ParserState {
            scanner,
            arena: NodeArena::new(),
            diagnostics: Vec::new(),
            file_name,
            last_token_end: 0,
        }
    }

    // =========================================================================
    // Token plumbing
    // =========================================================================

    fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    fn bump(&mut self) {
        self.last_token_end = self.scanner.token_span().end;
        self.scanner.scan();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_expected(kind.token_text());
        false
    }

    fn start(&self) -> u32 {
        self.scanner.token_span().start
    }

    fn finish(&self, start: u32) -> Span {
        Span::new(start, self.last_token_end.max(start))
    }

    fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.snapshot(),
            last_token_end: self.last_token_end,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    fn restore(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore(snapshot.scanner);
        self.last_token_end = snapshot.last_token_end;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    fn error_expected(&mut self, text: &str) {
        self.diagnostics.push(Diagnostic::new(
            diagnostic_messages::EXPECTED_TOKEN,
            self.file_name,
            self.scanner.token_span(),
            &[text],
        ));
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_source_file(&mut self) -> NodeIndex {
        let mut statements = Vec::new();
        while !self.at(SyntaxKind::EndOfFile) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
        }
        let span = Span::new(0, self.scanner.source().len() as u32);
        self.arena.add_source_file(NodeList::new(statements), span)
    }

    fn parse_statement(&mut self) -> Option<NodeIndex> {
        match self.token() {
            SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword | SyntaxKind::VarKeyword => {
                Some(self.parse_variable_statement())
            }
            SyntaxKind::DeclareKeyword => {
                let start = self.start();
                self.bump();
                if self.at(SyntaxKind::FunctionKeyword) {
                    Some(self.parse_function_declaration(true, start))
                } else {
                    self.error_expected("function");
                    None
                }
            }
            SyntaxKind::FunctionKeyword => {
                let start = self.start();
                Some(self.parse_function_declaration(false, start))
            }
            SyntaxKind::OpenBraceToken => Some(self.parse_block()),
            SyntaxKind::SemicolonToken => {
                self.bump();
                None
            }
            SyntaxKind::CloseBraceToken | SyntaxKind::Unknown => {
                self.error_expected("statement");
                self.bump();
                None
            }
            _ => {
                let start = self.start();
                let expression = self.parse_expression();
                self.eat(SyntaxKind::SemicolonToken);
                Some(
                    self.arena
                        .add_expression_statement(expression, self.finish(start)),
                )
            }
        }
    }

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let start = self.start();
        self.bump(); // let/const/var
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.start();
            let name = self.parse_identifier();
            let type_annotation = if self.eat(SyntaxKind::ColonToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let initializer = if self.eat(SyntaxKind::EqualsToken) {
                self.parse_expression()
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.arena.add_variable_declaration(
                name,
                type_annotation,
                initializer,
                self.finish(decl_start),
            ));
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.eat(SyntaxKind::SemicolonToken);
        self.arena
            .add_variable_statement(NodeList::new(declarations), self.finish(start))
    }

    fn parse_function_declaration(&mut self, is_ambient: bool, start: u32) -> NodeIndex {
        self.bump(); // function
        let name = self.parse_identifier();
        let parameters = self.parse_parameter_list();
        let return_type = if self.eat(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let body = if is_ambient {
            self.eat(SyntaxKind::SemicolonToken);
            NodeIndex::NONE
        } else {
            self.parse_block()
        };
        self.arena.add_function_declaration(
            name,
            parameters,
            return_type,
            body,
            is_ambient,
            self.finish(start),
        )
    }

    fn parse_parameter_list(&mut self) -> NodeList {
        let mut parameters = Vec::new();
        if self.expect(SyntaxKind::OpenParenToken) {
            while !self.at(SyntaxKind::CloseParenToken) && !self.at(SyntaxKind::EndOfFile) {
                parameters.push(self.parse_parameter());
                if !self.eat(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.expect(SyntaxKind::CloseParenToken);
        }
        NodeList::new(parameters)
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let start = self.start();
        let name = self.parse_identifier();
        let question_token = self.eat(SyntaxKind::QuestionToken);
        let type_annotation = if self.eat(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.arena
            .add_parameter(name, question_token, type_annotation, self.finish(start))
    }

    fn parse_block(&mut self) -> NodeIndex {
        let start = self.start();
        self.expect(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at(SyntaxKind::EndOfFile) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena
            .add_block(NodeList::new(statements), self.finish(start))
    }

    fn parse_identifier(&mut self) -> NodeIndex {
        if self.at(SyntaxKind::Identifier) {
            let atom = self.scanner.token_atom();
            let span = self.scanner.token_span();
            self.bump();
            self.arena.add_identifier(atom, span)
        } else {
            self.error_expected("identifier");
            let here = self.start();
            self.arena
                .add_identifier(Atom::NONE, Span::new(here, here))
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self) -> NodeIndex {
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }
        self.parse_conditional_expression()
    }

    /// Arrow functions in the subset have a single parameter: either bare
    /// (`val => ...`) or parenthesized with an optional annotation
    /// (`(val: T) => ...`). Anything else falls through to normal parsing.
    fn try_parse_arrow_function(&mut self) -> Option<NodeIndex> {
        if self.at(SyntaxKind::Identifier) {
            let snapshot = self.snapshot();
            let start = self.start();
            let atom = self.scanner.token_atom();
            let span = self.scanner.token_span();
            self.bump();
            if self.at(SyntaxKind::EqualsGreaterThanToken) {
                let name = self.arena.add_identifier(atom, span);
                let parameter = self.arena.add_parameter(name, false, NodeIndex::NONE, span);
                self.bump();
                let body = self.parse_expression();
                return Some(self.arena.add_arrow_function(
                    NodeList::new(vec![parameter]),
                    body,
                    self.finish(start),
                ));
            }
            self.restore(snapshot);
            return None;
        }

        if self.at(SyntaxKind::OpenParenToken) {
            let snapshot = self.snapshot();
            let start = self.start();
            self.bump();
            if self.at(SyntaxKind::Identifier) {
                let parameter = self.parse_parameter();
                if self.eat(SyntaxKind::CloseParenToken)
                    && self.at(SyntaxKind::EqualsGreaterThanToken)
                {
                    self.bump();
                    let body = self.parse_expression();
                    return Some(self.arena.add_arrow_function(
                        NodeList::new(vec![parameter]),
                        body,
                        self.finish(start),
                    ));
                }
            }
            self.restore(snapshot);
        }
        None
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.start();
        let condition = self.parse_logical_and_expression();
        if !self.at(SyntaxKind::QuestionToken) {
            return condition;
        }
        self.bump();
        let when_true = self.parse_expression();
        self.expect(SyntaxKind::ColonToken);
        let when_false = self.parse_expression();
        self.arena
            .add_conditional(condition, when_true, when_false, self.finish(start))
    }

    fn parse_logical_and_expression(&mut self) -> NodeIndex {
        let start = self.start();
        let mut left = self.parse_equality_expression();
        while self.at(SyntaxKind::AmpersandAmpersandToken) {
            self.bump();
            let right = self.parse_equality_expression();
            left = self.arena.add_binary(
                left,
                SyntaxKind::AmpersandAmpersandToken as u16,
                right,
                self.finish(start),
            );
        }
        left
    }

    fn parse_equality_expression(&mut self) -> NodeIndex {
        let start = self.start();
        let mut left = self.parse_call_or_access_expression();
        loop {
            let operator = match self.token() {
                SyntaxKind::ExclamationEqualsEqualsToken | SyntaxKind::EqualsEqualsEqualsToken => {
                    self.token()
                }
                _ => break,
            };
            self.bump();
            let right = self.parse_call_or_access_expression();
            left = self
                .arena
                .add_binary(left, operator as u16, right, self.finish(start));
        }
        left
    }

    fn parse_call_or_access_expression(&mut self) -> NodeIndex {
        let start = self.start();
        let mut expression = self.parse_primary_expression();
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.bump();
                    let name = self.parse_identifier();
                    expression = self.arena.add_property_access(
                        expression,
                        name,
                        false,
                        self.finish(start),
                    );
                }
                SyntaxKind::QuestionDotToken => {
                    self.bump();
                    if self.at(SyntaxKind::OpenBracketToken) {
                        self.bump();
                        let argument = self.parse_expression();
                        self.expect(SyntaxKind::CloseBracketToken);
                        expression = self.arena.add_element_access(
                            expression,
                            argument,
                            true,
                            self.finish(start),
                        );
                    } else if self.at(SyntaxKind::OpenParenToken) {
                        let arguments = self.parse_arguments();
                        expression = self.arena.add_call(expression, arguments, self.finish(start));
                    } else {
                        let name = self.parse_identifier();
                        expression = self.arena.add_property_access(
                            expression,
                            name,
                            true,
                            self.finish(start),
                        );
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    self.bump();
                    let argument = self.parse_expression();
                    self.expect(SyntaxKind::CloseBracketToken);
                    expression = self.arena.add_element_access(
                        expression,
                        argument,
                        false,
                        self.finish(start),
                    );
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_arguments();
                    expression = self.arena.add_call(expression, arguments, self.finish(start));
                }
                _ => break,
            }
        }
        expression
    }

    fn parse_arguments(&mut self) -> NodeList {
        let mut arguments = Vec::new();
        self.expect(SyntaxKind::OpenParenToken);
        while !self.at(SyntaxKind::CloseParenToken) && !self.at(SyntaxKind::EndOfFile) {
            arguments.push(self.parse_expression());
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParenToken);
        NodeList::new(arguments)
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let span = self.scanner.token_span();
        match self.token() {
            SyntaxKind::Identifier => {
                let atom = self.scanner.token_atom();
                self.bump();
                self.arena.add_identifier(atom, span)
            }
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral => {
                let kind = self.token() as u16;
                let atom = self.scanner.token_atom();
                self.bump();
                self.arena.add_literal(kind, atom, span)
            }
            SyntaxKind::NullKeyword | SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let kind = self.token() as u16;
                self.bump();
                self.arena.add_keyword(kind, span)
            }
            SyntaxKind::OpenParenToken => {
                let start = self.start();
                self.bump();
                let expression = self.parse_expression();
                self.expect(SyntaxKind::CloseParenToken);
                self.arena.add_parenthesized(expression, self.finish(start))
            }
            _ => {
                self.diagnostics.push(Diagnostic::new(
                    diagnostic_messages::UNEXPECTED_TOKEN,
                    self.file_name,
                    span,
                    &[],
                ));
                self.bump();
                self.arena
                    .add_identifier(Atom::NONE, Span::new(span.start, span.start))
            }
        }
    }

    // =========================================================================
    // Type annotations
    // =========================================================================

    fn parse_type(&mut self) -> NodeIndex {
        let start = self.start();
        let first = self.parse_array_suffix_type();
        if !self.at(SyntaxKind::BarToken) {
            return first;
        }
        let mut members = vec![first];
        while self.eat(SyntaxKind::BarToken) {
            members.push(self.parse_array_suffix_type());
        }
        self.arena
            .add_union_type(NodeList::new(members), self.finish(start))
    }

    fn parse_array_suffix_type(&mut self) -> NodeIndex {
        let start = self.start();
        let mut inner = self.parse_primary_type();
        while self.at(SyntaxKind::OpenBracketToken) {
            self.bump();
            self.expect(SyntaxKind::CloseBracketToken);
            inner = self.arena.add_array_type(inner, self.finish(start));
        }
        inner
    }

    fn parse_primary_type(&mut self) -> NodeIndex {
        let span = self.scanner.token_span();
        match self.token() {
            SyntaxKind::Identifier => {
                let atom = self.scanner.token_atom();
                self.bump();
                self.arena.add_type_reference(atom, span)
            }
            SyntaxKind::NullKeyword => {
                let atom = self.scanner.interner_mut().intern("null");
                self.bump();
                self.arena.add_type_reference(atom, span)
            }
            SyntaxKind::OpenParenToken => {
                if let Some(function_type) = self.try_parse_function_type() {
                    return function_type;
                }
                let start = self.start();
                self.bump();
                let inner = self.parse_type();
                self.expect(SyntaxKind::CloseParenToken);
                self.arena
                    .add_parenthesized_type(inner, self.finish(start))
            }
            _ => {
                self.error_expected("type");
                self.bump();
                self.arena.add_type_reference(Atom::NONE, span)
            }
        }
    }

    /// `(a: T, b?: U) => R` or `() => R`; restores on anything else.
    fn try_parse_function_type(&mut self) -> Option<NodeIndex> {
        let snapshot = self.snapshot();
        let start = self.start();
        self.bump(); // (

        let mut parameters = Vec::new();
        if !self.at(SyntaxKind::CloseParenToken) {
            if !self.at(SyntaxKind::Identifier) {
                self.restore(snapshot);
                return None;
            }
            loop {
                parameters.push(self.parse_parameter());
                if !self.eat(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        if self.eat(SyntaxKind::CloseParenToken) && self.at(SyntaxKind::EqualsGreaterThanToken) {
            self.bump();
            let return_type = self.parse_type();
            return Some(self.arena.add_function_type(
                NodeList::new(parameters),
                return_type,
                self.finish(start),
            ));
        }
        self.restore(snapshot);
        None
    }
}
