//! Thin node records, per-kind payload structs, and the `NodeArena`.

use super::base::{NodeIndex, NodeList};
use nulint_common::interner::{Atom, Interner};
use nulint_common::span::Span;

/// A thin node: kind tag, source span, and an index into its kind's pool.
#[derive(Copy, Clone, Debug)]
pub struct Node {
    pub kind: u16,
    pub span: Span,
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    pub const fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }
}

/// Side table entries present for every node.
#[derive(Copy, Clone, Debug)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

// =============================================================================
// Payload structs (one pool per kind)
// =============================================================================

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub atom: Atom,
}

/// Numeric and string literals store their raw token text.
#[derive(Clone, Debug)]
pub struct LiteralData {
    pub atom: Atom,
}

/// Shared payload for property and element access expressions.
///
/// `name_or_argument` is the property name identifier for
/// `PROPERTY_ACCESS_EXPRESSION` and the index expression for
/// `ELEMENT_ACCESS_EXPRESSION`.
#[derive(Clone, Debug)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}

#[derive(Clone, Debug)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    /// Operator token kind (`SyntaxKind as u16`).
    pub operator_token: u16,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ArrowFunctionData {
    pub parameters: NodeList,
    /// Expression body (block bodies are not part of the analyzed subset).
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub question_token: bool,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct FunctionDeclData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub return_type: NodeIndex,
    /// `NodeIndex::NONE` for `declare function` signatures.
    pub body: NodeIndex,
    pub is_ambient: bool,
}

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct TypeRefData {
    pub atom: Atom,
}

#[derive(Clone, Debug)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

#[derive(Clone, Debug)]
pub struct ArrayTypeData {
    pub element_type: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct FunctionTypeData {
    pub parameters: NodeList,
    pub return_type: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct WrappedTypeData {
    pub inner: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

// =============================================================================
// NodeArena
// =============================================================================

/// Flat node storage with per-kind payload pools.
#[derive(Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
    pub(crate) extended_info: Vec<ExtendedNodeInfo>,
    pub(crate) interner: Interner,

    pub(crate) identifiers: Vec<IdentifierData>,
    pub(crate) literals: Vec<LiteralData>,
    pub(crate) access_exprs: Vec<AccessExprData>,
    pub(crate) call_exprs: Vec<CallExprData>,
    pub(crate) binary_exprs: Vec<BinaryExprData>,
    pub(crate) conditional_exprs: Vec<ConditionalExprData>,
    pub(crate) arrow_functions: Vec<ArrowFunctionData>,
    pub(crate) parameters: Vec<ParameterData>,
    pub(crate) variables: Vec<VariableStatementData>,
    pub(crate) variable_declarations: Vec<VariableDeclarationData>,
    pub(crate) functions: Vec<FunctionDeclData>,
    pub(crate) blocks: Vec<BlockData>,
    pub(crate) expr_statements: Vec<ExprStatementData>,
    pub(crate) source_files: Vec<SourceFileData>,
    pub(crate) type_refs: Vec<TypeRefData>,
    pub(crate) composite_types: Vec<CompositeTypeData>,
    pub(crate) array_types: Vec<ArrayTypeData>,
    pub(crate) function_types: Vec<FunctionTypeData>,
    pub(crate) wrapped_types: Vec<WrappedTypeData>,
    pub(crate) parenthesized: Vec<ParenthesizedData>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Set the interner (called after parsing to transfer ownership from
    /// the scanner).
    pub fn set_interner(&mut self, interner: Interner) {
        self.interner = interner;
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }
}
