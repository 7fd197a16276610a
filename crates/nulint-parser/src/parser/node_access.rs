//! NodeArena access methods.
//!
//! Typed accessors return `None` when the node kind does not match, so
//! call sites read as `let Some(call) = arena.get_call_expr(node) else ...`.

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext::*;
use nulint_common::interner::Atom;
use nulint_scanner::SyntaxKind;

impl NodeArena {
    /// Get a thin node by index.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get extended info for a node.
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parent of a node, or `NodeIndex::NONE` at the root.
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map(|info| info.parent)
            .unwrap_or(NodeIndex::NONE)
    }

    // =========================================================================
    // Typed payload accessors
    // =========================================================================

    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.kind == SyntaxKind::Identifier as u16 {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        if node.has_data()
            && (node.kind == SyntaxKind::NumericLiteral as u16
                || node.kind == SyntaxKind::StringLiteral as u16)
        {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Access expression data for property and element accesses alike.
    #[inline]
    pub fn get_access_expr(&self, node: &Node) -> Option<&AccessExprData> {
        if node.has_data()
            && (node.kind == PROPERTY_ACCESS_EXPRESSION || node.kind == ELEMENT_ACCESS_EXPRESSION)
        {
            self.access_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_call_expr(&self, node: &Node) -> Option<&CallExprData> {
        if node.has_data() && node.kind == CALL_EXPRESSION {
            self.call_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binary_expr(&self, node: &Node) -> Option<&BinaryExprData> {
        if node.has_data() && node.kind == BINARY_EXPRESSION {
            self.binary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_conditional_expr(&self, node: &Node) -> Option<&ConditionalExprData> {
        if node.has_data() && node.kind == CONDITIONAL_EXPRESSION {
            self.conditional_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_arrow_function(&self, node: &Node) -> Option<&ArrowFunctionData> {
        if node.has_data() && node.kind == ARROW_FUNCTION {
            self.arrow_functions.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_parameter(&self, node: &Node) -> Option<&ParameterData> {
        if node.has_data() && node.kind == PARAMETER {
            self.parameters.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable_statement(&self, node: &Node) -> Option<&VariableStatementData> {
        if node.has_data() && node.kind == VARIABLE_STATEMENT {
            self.variables.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable_declaration(&self, node: &Node) -> Option<&VariableDeclarationData> {
        if node.has_data() && node.kind == VARIABLE_DECLARATION {
            self.variable_declarations.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_function_decl(&self, node: &Node) -> Option<&FunctionDeclData> {
        if node.has_data() && node.kind == FUNCTION_DECLARATION {
            self.functions.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_block(&self, node: &Node) -> Option<&BlockData> {
        if node.has_data() && node.kind == BLOCK {
            self.blocks.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_expr_statement(&self, node: &Node) -> Option<&ExprStatementData> {
        if node.has_data() && node.kind == EXPRESSION_STATEMENT {
            self.expr_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_source_file(&self, node: &Node) -> Option<&SourceFileData> {
        if node.has_data() && node.kind == SOURCE_FILE {
            self.source_files.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_type_ref(&self, node: &Node) -> Option<&TypeRefData> {
        if node.has_data() && node.kind == TYPE_REFERENCE {
            self.type_refs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_union_type(&self, node: &Node) -> Option<&CompositeTypeData> {
        if node.has_data() && node.kind == UNION_TYPE {
            self.composite_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_array_type(&self, node: &Node) -> Option<&ArrayTypeData> {
        if node.has_data() && node.kind == ARRAY_TYPE {
            self.array_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_function_type(&self, node: &Node) -> Option<&FunctionTypeData> {
        if node.has_data() && node.kind == FUNCTION_TYPE {
            self.function_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_wrapped_type(&self, node: &Node) -> Option<&WrappedTypeData> {
        if node.has_data() && node.kind == PARENTHESIZED_TYPE {
            self.wrapped_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_parenthesized(&self, node: &Node) -> Option<&ParenthesizedData> {
        if node.has_data() && node.kind == PARENTHESIZED_EXPRESSION {
            self.parenthesized.get(node.data_index as usize)
        } else {
            None
        }
    }

    // =========================================================================
    // Convenience queries
    // =========================================================================

    /// Atom of an identifier node, or `Atom::NONE` for anything else.
    pub fn identifier_atom(&self, index: NodeIndex) -> Atom {
        self.get(index)
            .and_then(|node| self.get_identifier(node))
            .map(|data| data.atom)
            .unwrap_or(Atom::NONE)
    }

    /// Resolve an identifier node's text.
    pub fn identifier_text(&self, index: NodeIndex) -> &str {
        self.interner.resolve(self.identifier_atom(index))
    }

    /// Strip parenthesized wrappers from an expression.
    pub fn skip_parenthesized(&self, index: NodeIndex) -> NodeIndex {
        let mut current = index;
        while let Some(node) = self.get(current)
            && let Some(paren) = self.get_parenthesized(node)
        {
            current = paren.expression;
        }
        current
    }

    /// Checks if a node is (part of) an optional chain (`?.`).
    pub fn is_optional_chain(&self, index: NodeIndex) -> bool {
        let Some(node) = self.get(index) else {
            return false;
        };
        if let Some(access) = self.get_access_expr(node) {
            return access.question_dot_token || self.is_optional_chain(access.expression);
        }
        if let Some(call) = self.get_call_expr(node) {
            return self.is_optional_chain(call.expression);
        }
        false
    }
}
