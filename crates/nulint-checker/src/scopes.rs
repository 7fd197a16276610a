//! Lexical scope binding.
//!
//! One pass over the tree records, for every node, the scope it sits in, and
//! for every scope, the names declared there. The checker uses this to tell
//! a global `Number` reference apart from a shadowing local.

use nulint_common::interner::Atom;
use nulint_parser::syntax_kind_ext::*;
use nulint_parser::{NodeArena, NodeIndex};
use rustc_hash::FxHashMap;

pub type ScopeId = u32;

struct Scope {
    parent: Option<ScopeId>,
    declarations: FxHashMap<Atom, NodeIndex>,
}

pub struct ScopeTree {
    scopes: Vec<Scope>,
    /// Scope of each node, indexed by `NodeIndex`.
    node_scopes: Vec<ScopeId>,
}

impl ScopeTree {
    /// Bind a parsed source file, producing its scope tree.
    pub fn bind(arena: &NodeArena, root: NodeIndex) -> ScopeTree {
        let mut tree = ScopeTree {
            scopes: vec![Scope {
                parent: None,
                declarations: FxHashMap::default(),
            }],
            node_scopes: vec![0; arena.node_count()],
        };
        tree.bind_node(arena, root, 0);
        tree
    }

    fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = self.scopes.len() as ScopeId;
        self.scopes.push(Scope {
            parent: Some(parent),
            declarations: FxHashMap::default(),
        });
        id
    }

    fn declare(&mut self, scope: ScopeId, atom: Atom, declaration: NodeIndex) {
        if !atom.is_none() {
            self.scopes[scope as usize]
                .declarations
                .insert(atom, declaration);
        }
    }

    fn bind_node(&mut self, arena: &NodeArena, index: NodeIndex, scope: ScopeId) {
        let Some(node) = arena.get(index) else {
            return;
        };
        self.node_scopes[index.0 as usize] = scope;

        match node.kind {
            SOURCE_FILE => {
                if let Some(file) = arena.get_source_file(node) {
                    for &statement in &file.statements.nodes {
                        self.bind_node(arena, statement, scope);
                    }
                }
            }
            VARIABLE_STATEMENT => {
                if let Some(var) = arena.get_variable_statement(node) {
                    for &declaration in &var.declarations.nodes {
                        self.bind_node(arena, declaration, scope);
                    }
                }
            }
            VARIABLE_DECLARATION => {
                if let Some(decl) = arena.get_variable_declaration(node) {
                    self.declare(scope, arena.identifier_atom(decl.name), index);
                    self.bind_node(arena, decl.name, scope);
                    self.bind_node(arena, decl.type_annotation, scope);
                    self.bind_node(arena, decl.initializer, scope);
                }
            }
            FUNCTION_DECLARATION => {
                if let Some(func) = arena.get_function_decl(node) {
                    self.declare(scope, arena.identifier_atom(func.name), index);
                    self.bind_node(arena, func.name, scope);
                    let body_scope = self.new_scope(scope);
                    let parameters = func.parameters.nodes.clone();
                    let (return_type, body) = (func.return_type, func.body);
                    for &parameter in &parameters {
                        self.bind_node(arena, parameter, body_scope);
                    }
                    self.bind_node(arena, return_type, body_scope);
                    self.bind_node(arena, body, body_scope);
                }
            }
            PARAMETER => {
                if let Some(param) = arena.get_parameter(node) {
                    self.declare(scope, arena.identifier_atom(param.name), index);
                    self.bind_node(arena, param.name, scope);
                    self.bind_node(arena, param.type_annotation, scope);
                }
            }
            BLOCK => {
                if let Some(block) = arena.get_block(node) {
                    let inner = self.new_scope(scope);
                    let statements = block.statements.nodes.clone();
                    for &statement in &statements {
                        self.bind_node(arena, statement, inner);
                    }
                }
            }
            EXPRESSION_STATEMENT => {
                if let Some(stmt) = arena.get_expr_statement(node) {
                    self.bind_node(arena, stmt.expression, scope);
                }
            }
            ARROW_FUNCTION => {
                if let Some(arrow) = arena.get_arrow_function(node) {
                    let inner = self.new_scope(scope);
                    let parameters = arrow.parameters.nodes.clone();
                    let body = arrow.body;
                    for &parameter in &parameters {
                        self.bind_node(arena, parameter, inner);
                    }
                    self.bind_node(arena, body, inner);
                }
            }
            CALL_EXPRESSION => {
                if let Some(call) = arena.get_call_expr(node) {
                    self.bind_node(arena, call.expression, scope);
                    for &argument in &call.arguments.nodes {
                        self.bind_node(arena, argument, scope);
                    }
                }
            }
            PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => {
                if let Some(access) = arena.get_access_expr(node) {
                    self.bind_node(arena, access.expression, scope);
                    self.bind_node(arena, access.name_or_argument, scope);
                }
            }
            BINARY_EXPRESSION => {
                if let Some(binary) = arena.get_binary_expr(node) {
                    self.bind_node(arena, binary.left, scope);
                    self.bind_node(arena, binary.right, scope);
                }
            }
            CONDITIONAL_EXPRESSION => {
                if let Some(cond) = arena.get_conditional_expr(node) {
                    self.bind_node(arena, cond.condition, scope);
                    self.bind_node(arena, cond.when_true, scope);
                    self.bind_node(arena, cond.when_false, scope);
                }
            }
            PARENTHESIZED_EXPRESSION => {
                if let Some(paren) = arena.get_parenthesized(node) {
                    self.bind_node(arena, paren.expression, scope);
                }
            }
            UNION_TYPE => {
                if let Some(union) = arena.get_union_type(node) {
                    for &member in &union.types.nodes {
                        self.bind_node(arena, member, scope);
                    }
                }
            }
            ARRAY_TYPE => {
                if let Some(array) = arena.get_array_type(node) {
                    self.bind_node(arena, array.element_type, scope);
                }
            }
            FUNCTION_TYPE => {
                // function type parameters are not value declarations
                if let Some(func) = arena.get_function_type(node) {
                    let parameters = func.parameters.nodes.clone();
                    let return_type = func.return_type;
                    for &parameter in &parameters {
                        if let Some(param_node) = arena.get(parameter) {
                            self.node_scopes[parameter.0 as usize] = scope;
                            if let Some(param) = arena.get_parameter(param_node) {
                                self.bind_node(arena, param.name, scope);
                                self.bind_node(arena, param.type_annotation, scope);
                            }
                        }
                    }
                    self.bind_node(arena, return_type, scope);
                }
            }
            PARENTHESIZED_TYPE => {
                if let Some(wrapped) = arena.get_wrapped_type(node) {
                    self.bind_node(arena, wrapped.inner, scope);
                }
            }
            _ => {
                // identifiers, literals, keywords, type references: leaf
            }
        }
    }

    /// Resolve `atom` starting from the scope containing `from`. `None`
    /// means no user declaration is in scope, i.e. the name is global.
    pub fn resolve(&self, from: NodeIndex, atom: Atom) -> Option<NodeIndex> {
        if atom.is_none() {
            return None;
        }
        let mut scope = *self.node_scopes.get(from.0 as usize)?;
        loop {
            let entry = &self.scopes[scope as usize];
            if let Some(&declaration) = entry.declarations.get(&atom) {
                return Some(declaration);
            }
            scope = entry.parent?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nulint_parser::parse_source_file;
    use nulint_scanner::SyntaxKind;

    fn find_identifier(arena: &NodeArena, name: &str, nth: usize) -> NodeIndex {
        let mut seen = 0;
        for raw in 0..arena.node_count() {
            let idx = NodeIndex(raw as u32);
            if let Some(node) = arena.get(idx)
                && node.kind == SyntaxKind::Identifier as u16
                && arena.identifier_text(idx) == name
            {
                if seen == nth {
                    return idx;
                }
                seen += 1;
            }
        }
        panic!("identifier {name:?} #{nth} not found");
    }

    #[test]
    fn top_level_declaration_resolves() {
        let parsed = parse_source_file("test.ts", "let v: number;\nv;");
        let scopes = ScopeTree::bind(&parsed.arena, parsed.root);
        let reference = find_identifier(&parsed.arena, "v", 1);
        let atom = parsed.arena.identifier_atom(reference);
        assert!(scopes.resolve(reference, atom).is_some());
    }

    #[test]
    fn block_declarations_do_not_leak() {
        let parsed = parse_source_file("test.ts", "{\n  let x = 1;\n}\nx;");
        let scopes = ScopeTree::bind(&parsed.arena, parsed.root);
        let outer = find_identifier(&parsed.arena, "x", 1);
        let atom = parsed.arena.identifier_atom(outer);
        assert!(scopes.resolve(outer, atom).is_none());
    }

    #[test]
    fn parameters_bind_inside_their_function_only() {
        let source = "function f(n: number) {\n  n;\n}\nn;";
        let parsed = parse_source_file("test.ts", source);
        let scopes = ScopeTree::bind(&parsed.arena, parsed.root);
        let inner = find_identifier(&parsed.arena, "n", 1);
        let outer = find_identifier(&parsed.arena, "n", 2);
        let atom = parsed.arena.identifier_atom(inner);
        assert!(scopes.resolve(inner, atom).is_some());
        assert!(scopes.resolve(outer, atom).is_none());
    }

    #[test]
    fn arrow_parameters_shadow_outer_names() {
        let source = "let v: number;\nlet a: number[];\na.map(v => v);";
        let parsed = parse_source_file("test.ts", source);
        let scopes = ScopeTree::bind(&parsed.arena, parsed.root);
        let body_ref = find_identifier(&parsed.arena, "v", 2);
        let atom = parsed.arena.identifier_atom(body_ref);
        let declaration = scopes.resolve(body_ref, atom).unwrap();
        let decl_node = parsed.arena.get(declaration).unwrap();
        assert_eq!(decl_node.kind, PARAMETER);
    }
}
