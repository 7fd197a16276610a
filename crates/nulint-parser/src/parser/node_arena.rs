//! NodeArena creation methods (add_* methods).
//!
//! Children are always created before their parents; `set_parent` records the
//! upward link as each parent is built.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;
use nulint_common::interner::Atom;
use nulint_common::span::Span;

impl NodeArena {
    fn push_node(&mut self, kind: u16, span: Span, data_index: u32) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            data_index,
        });
        self.extended_info.push(ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        });
        index
    }

    /// Set the parent for a single child node.
    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if !child.is_none()
            && let Some(info) = self.extended_info.get_mut(child.0 as usize)
        {
            info.parent = parent;
        }
    }

    /// Set the parent for a list of children.
    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    // =========================================================================
    // Terminals
    // =========================================================================

    pub fn add_identifier(&mut self, atom: Atom, span: Span) -> NodeIndex {
        let data = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData { atom });
        self.push_node(
            nulint_scanner::SyntaxKind::Identifier as u16,
            span,
            data,
        )
    }

    /// Numeric or string literal node (kind is the token kind).
    pub fn add_literal(&mut self, kind: u16, atom: Atom, span: Span) -> NodeIndex {
        let data = self.literals.len() as u32;
        self.literals.push(LiteralData { atom });
        self.push_node(kind, span, data)
    }

    /// `null` / `true` / `false` keyword node (no payload).
    pub fn add_keyword(&mut self, kind: u16, span: Span) -> NodeIndex {
        self.push_node(kind, span, Node::NO_DATA)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn add_property_access(
        &mut self,
        expression: NodeIndex,
        name: NodeIndex,
        question_dot_token: bool,
        span: Span,
    ) -> NodeIndex {
        let data = self.access_exprs.len() as u32;
        self.access_exprs.push(AccessExprData {
            expression,
            name_or_argument: name,
            question_dot_token,
        });
        let index = self.push_node(PROPERTY_ACCESS_EXPRESSION, span, data);
        self.set_parent(expression, index);
        self.set_parent(name, index);
        index
    }

    pub fn add_element_access(
        &mut self,
        expression: NodeIndex,
        argument: NodeIndex,
        question_dot_token: bool,
        span: Span,
    ) -> NodeIndex {
        let data = self.access_exprs.len() as u32;
        self.access_exprs.push(AccessExprData {
            expression,
            name_or_argument: argument,
            question_dot_token,
        });
        let index = self.push_node(ELEMENT_ACCESS_EXPRESSION, span, data);
        self.set_parent(expression, index);
        self.set_parent(argument, index);
        index
    }

    pub fn add_call(
        &mut self,
        expression: NodeIndex,
        arguments: NodeList,
        span: Span,
    ) -> NodeIndex {
        let data = self.call_exprs.len() as u32;
        let index = self.push_node(CALL_EXPRESSION, span, data);
        self.set_parent(expression, index);
        self.set_parent_list(&arguments, index);
        self.call_exprs.push(CallExprData {
            expression,
            arguments,
        });
        index
    }

    pub fn add_binary(
        &mut self,
        left: NodeIndex,
        operator_token: u16,
        right: NodeIndex,
        span: Span,
    ) -> NodeIndex {
        let data = self.binary_exprs.len() as u32;
        self.binary_exprs.push(BinaryExprData {
            left,
            operator_token,
            right,
        });
        let index = self.push_node(BINARY_EXPRESSION, span, data);
        self.set_parent(left, index);
        self.set_parent(right, index);
        index
    }

    pub fn add_conditional(
        &mut self,
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
        span: Span,
    ) -> NodeIndex {
        let data = self.conditional_exprs.len() as u32;
        self.conditional_exprs.push(ConditionalExprData {
            condition,
            when_true,
            when_false,
        });
        let index = self.push_node(CONDITIONAL_EXPRESSION, span, data);
        self.set_parent(condition, index);
        self.set_parent(when_true, index);
        self.set_parent(when_false, index);
        index
    }

    pub fn add_arrow_function(
        &mut self,
        parameters: NodeList,
        body: NodeIndex,
        span: Span,
    ) -> NodeIndex {
        let data = self.arrow_functions.len() as u32;
        let index = self.push_node(ARROW_FUNCTION, span, data);
        self.set_parent_list(&parameters, index);
        self.set_parent(body, index);
        self.arrow_functions.push(ArrowFunctionData { parameters, body });
        index
    }

    pub fn add_parenthesized(&mut self, expression: NodeIndex, span: Span) -> NodeIndex {
        let data = self.parenthesized.len() as u32;
        self.parenthesized.push(ParenthesizedData { expression });
        let index = self.push_node(PARENTHESIZED_EXPRESSION, span, data);
        self.set_parent(expression, index);
        index
    }

    // =========================================================================
    // Declarations and statements
    // =========================================================================

    pub fn add_parameter(
        &mut self,
        name: NodeIndex,
        question_token: bool,
        type_annotation: NodeIndex,
        span: Span,
    ) -> NodeIndex {
        let data = self.parameters.len() as u32;
        self.parameters.push(ParameterData {
            name,
            question_token,
            type_annotation,
        });
        let index = self.push_node(PARAMETER, span, data);
        self.set_parent(name, index);
        self.set_parent(type_annotation, index);
        index
    }

    pub fn add_variable_declaration(
        &mut self,
        name: NodeIndex,
        type_annotation: NodeIndex,
        initializer: NodeIndex,
        span: Span,
    ) -> NodeIndex {
        let data = self.variable_declarations.len() as u32;
        self.variable_declarations.push(VariableDeclarationData {
            name,
            type_annotation,
            initializer,
        });
        let index = self.push_node(VARIABLE_DECLARATION, span, data);
        self.set_parent(name, index);
        self.set_parent(type_annotation, index);
        self.set_parent(initializer, index);
        index
    }

    pub fn add_variable_statement(&mut self, declarations: NodeList, span: Span) -> NodeIndex {
        let data = self.variables.len() as u32;
        let index = self.push_node(VARIABLE_STATEMENT, span, data);
        self.set_parent_list(&declarations, index);
        self.variables.push(VariableStatementData { declarations });
        index
    }

    pub fn add_function_declaration(
        &mut self,
        name: NodeIndex,
        parameters: NodeList,
        return_type: NodeIndex,
        body: NodeIndex,
        is_ambient: bool,
        span: Span,
    ) -> NodeIndex {
        let data = self.functions.len() as u32;
        let index = self.push_node(FUNCTION_DECLARATION, span, data);
        self.set_parent(name, index);
        self.set_parent_list(&parameters, index);
        self.set_parent(return_type, index);
        self.set_parent(body, index);
        self.functions.push(FunctionDeclData {
            name,
            parameters,
            return_type,
            body,
            is_ambient,
        });
        index
    }

    pub fn add_block(&mut self, statements: NodeList, span: Span) -> NodeIndex {
        let data = self.blocks.len() as u32;
        let index = self.push_node(BLOCK, span, data);
        self.set_parent_list(&statements, index);
        self.blocks.push(BlockData { statements });
        index
    }

    pub fn add_expression_statement(&mut self, expression: NodeIndex, span: Span) -> NodeIndex {
        let data = self.expr_statements.len() as u32;
        self.expr_statements.push(ExprStatementData { expression });
        let index = self.push_node(EXPRESSION_STATEMENT, span, data);
        self.set_parent(expression, index);
        index
    }

    pub fn add_source_file(&mut self, statements: NodeList, span: Span) -> NodeIndex {
        let data = self.source_files.len() as u32;
        let index = self.push_node(SOURCE_FILE, span, data);
        self.set_parent_list(&statements, index);
        self.source_files.push(SourceFileData { statements });
        index
    }

    // =========================================================================
    // Type annotations
    // =========================================================================

    pub fn add_type_reference(&mut self, atom: Atom, span: Span) -> NodeIndex {
        let data = self.type_refs.len() as u32;
        self.type_refs.push(TypeRefData { atom });
        self.push_node(TYPE_REFERENCE, span, data)
    }

    pub fn add_union_type(&mut self, types: NodeList, span: Span) -> NodeIndex {
        let data = self.composite_types.len() as u32;
        let index = self.push_node(UNION_TYPE, span, data);
        self.set_parent_list(&types, index);
        self.composite_types.push(CompositeTypeData { types });
        index
    }

    pub fn add_array_type(&mut self, element_type: NodeIndex, span: Span) -> NodeIndex {
        let data = self.array_types.len() as u32;
        self.array_types.push(ArrayTypeData { element_type });
        let index = self.push_node(ARRAY_TYPE, span, data);
        self.set_parent(element_type, index);
        index
    }

    pub fn add_function_type(
        &mut self,
        parameters: NodeList,
        return_type: NodeIndex,
        span: Span,
    ) -> NodeIndex {
        let data = self.function_types.len() as u32;
        let index = self.push_node(FUNCTION_TYPE, span, data);
        self.set_parent_list(&parameters, index);
        self.set_parent(return_type, index);
        self.function_types.push(FunctionTypeData {
            parameters,
            return_type,
        });
        index
    }

    pub fn add_parenthesized_type(&mut self, inner: NodeIndex, span: Span) -> NodeIndex {
        let data = self.wrapped_types.len() as u32;
        self.wrapped_types.push(WrappedTypeData { inner });
        let index = self.push_node(PARENTHESIZED_TYPE, span, data);
        self.set_parent(inner, index);
        index
    }
}
