//! Composite node kinds, extending the scanner's token kinds.
//!
//! Identifier and literal nodes reuse their `SyntaxKind` token values
//! directly (`node.kind == SyntaxKind::Identifier as u16`); the constants
//! here cover everything the parser builds on top of single tokens.

pub const SOURCE_FILE: u16 = 300;
pub const VARIABLE_STATEMENT: u16 = 301;
pub const VARIABLE_DECLARATION: u16 = 302;
pub const FUNCTION_DECLARATION: u16 = 303;
pub const PARAMETER: u16 = 304;
pub const BLOCK: u16 = 305;
pub const EXPRESSION_STATEMENT: u16 = 306;

pub const CALL_EXPRESSION: u16 = 310;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = 311;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = 312;
pub const PARENTHESIZED_EXPRESSION: u16 = 313;
pub const BINARY_EXPRESSION: u16 = 314;
pub const CONDITIONAL_EXPRESSION: u16 = 315;
pub const ARROW_FUNCTION: u16 = 316;

pub const TYPE_REFERENCE: u16 = 320;
pub const UNION_TYPE: u16 = 321;
pub const ARRAY_TYPE: u16 = 322;
pub const FUNCTION_TYPE: u16 = 323;
pub const PARENTHESIZED_TYPE: u16 = 324;
