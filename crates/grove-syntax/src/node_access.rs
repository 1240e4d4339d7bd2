//! NodeArena access methods: typed data getters, parent walking and child enumeration.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use grove_common::Span;
use grove_common::limits::MAX_PARENT_WALK;
use smallvec::SmallVec;

macro_rules! pool_getter {
    ($(#[$doc:meta])* $name:ident, $pool:ident, $data:ty, $($kind:path)|+) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$data> {
            if node.has_data() && matches!(node.kind, $($kind)|+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|n| n.kind)
    }

    #[inline]
    pub fn span(&self, index: NodeIndex) -> Option<Span> {
        self.get(index).map(|n| n.span)
    }

    /// Parent of `index`, `NodeIndex::NONE` for roots and missing nodes.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    #[inline]
    pub fn modifiers(&self, index: NodeIndex) -> Modifiers {
        self.get(index).map_or(Modifiers::empty(), |n| n.modifiers)
    }

    pool_getter!(get_identifier, identifiers, IdentifierData, SyntaxKind::Identifier);
    pool_getter!(get_source_file, source_files, SourceFileData, SyntaxKind::SourceFile);
    pool_getter!(get_package, packages, PackageData, SyntaxKind::PackageDeclaration);
    pool_getter!(get_import, imports, ImportData, SyntaxKind::ImportDeclaration);
    pool_getter!(get_type_decl, type_decls, TypeDeclData, SyntaxKind::TypeDeclaration);
    pool_getter!(get_class_body, class_bodies, ClassBodyData, SyntaxKind::ClassBody);
    pool_getter!(get_method, methods, MethodData, SyntaxKind::MethodDeclaration);
    pool_getter!(
        /// Variable data for fields, parameters and local declarations.
        get_variable,
        variables,
        VariableData,
        SyntaxKind::FieldDeclaration | SyntaxKind::Parameter | SyntaxKind::VariableDeclaration
    );
    pool_getter!(get_block, blocks, BlockData, SyntaxKind::Block);
    pool_getter!(
        get_expression_statement,
        expr_statements,
        ExpressionStatementData,
        SyntaxKind::ExpressionStatement
    );
    pool_getter!(get_assignment, assignments, AssignmentData, SyntaxKind::AssignmentExpression);
    pool_getter!(
        /// Reference data for value and type references.
        get_reference,
        references,
        ReferenceData,
        SyntaxKind::ReferenceExpression | SyntaxKind::TypeOrPackageReference
    );
    pool_getter!(get_primitive_type, primitive_types, PrimitiveTypeData, SyntaxKind::PrimitiveType);
    pool_getter!(get_array_type, array_types, ArrayTypeData, SyntaxKind::ArrayType);
    pool_getter!(get_call, calls, CallData, SyntaxKind::CallExpression);
    pool_getter!(get_new, news, NewData, SyntaxKind::NewExpression);
    pool_getter!(get_argument_list, argument_lists, ArgumentListData, SyntaxKind::ArgumentList);
    pool_getter!(get_literal, literals, LiteralData, SyntaxKind::Literal);
    pool_getter!(
        get_collection_literal,
        collection_literals,
        CollectionLiteralData,
        SyntaxKind::ListLiteral | SyntaxKind::MapLiteral
    );
    pool_getter!(
        get_parenthesized,
        parenthesized,
        ParenthesizedData,
        SyntaxKind::ParenthesizedExpression
    );
    pool_getter!(get_cast, casts, CastData, SyntaxKind::CastExpression);
    pool_getter!(get_closure, closures, ClosureData, SyntaxKind::ClosureExpression);
    pool_getter!(get_for_statement, for_statements, ForStatementData, SyntaxKind::ForStatement);
    pool_getter!(
        get_legacy_for_clause,
        legacy_for_clauses,
        LegacyForClauseData,
        SyntaxKind::LegacyForClause
    );
    pool_getter!(get_for_in_clause, for_in_clauses, ForInClauseData, SyntaxKind::ForInClause);

    /// Reference data for the node at `index`.
    #[inline]
    pub fn get_reference_at(&self, index: NodeIndex) -> Option<&ReferenceData> {
        self.get_reference(self.get(index)?)
    }

    /// Variable data for the node at `index`.
    #[inline]
    pub fn get_variable_at(&self, index: NodeIndex) -> Option<&VariableData> {
        self.get_variable(self.get(index)?)
    }

    /// Text of an identifier node.
    pub fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|data| data.text.as_str())
    }

    /// Declared name of a type, method, field, parameter or local variable.
    pub fn declaration_name(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        let name = match node.kind {
            SyntaxKind::TypeDeclaration => self.get_type_decl(node)?.name,
            SyntaxKind::MethodDeclaration => self.get_method(node)?.name,
            SyntaxKind::FieldDeclaration
            | SyntaxKind::Parameter
            | SyntaxKind::VariableDeclaration => self.get_variable(node)?.name,
            _ => return None,
        };
        self.get_identifier_text(name)
    }

    /// Walk the parent chain starting at the parent of `index`.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            current: self.parent(index),
            remaining: MAX_PARENT_WALK,
        }
    }

    /// Nearest ancestor whose kind is one of `kinds`.
    pub fn find_ancestor(&self, index: NodeIndex, kinds: &[SyntaxKind]) -> Option<NodeIndex> {
        self.ancestors(index)
            .find(|&ancestor| self.kind(ancestor).is_some_and(|k| kinds.contains(&k)))
    }

    /// Direct children of a node in source order.
    pub fn get_children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 8]> {
        let mut children: SmallVec<[NodeIndex; 8]> = SmallVec::new();
        let Some(node) = self.get(index) else {
            return children;
        };

        let add_opt = |children: &mut SmallVec<[NodeIndex; 8]>, idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };
        let add_list = |children: &mut SmallVec<[NodeIndex; 8]>, list: &NodeList| {
            children.extend(list.iter());
        };

        match node.kind {
            SyntaxKind::SourceFile => {
                if let Some(data) = self.get_source_file(node) {
                    add_opt(&mut children, data.package);
                    add_list(&mut children, &data.imports);
                    add_list(&mut children, &data.statements);
                }
            }
            SyntaxKind::TypeDeclaration => {
                if let Some(data) = self.get_type_decl(node) {
                    add_opt(&mut children, data.name);
                    add_list(&mut children, &data.extends);
                    add_list(&mut children, &data.implements);
                    add_opt(&mut children, data.body);
                }
            }
            SyntaxKind::ClassBody => {
                if let Some(data) = self.get_class_body(node) {
                    add_list(&mut children, &data.members);
                }
            }
            SyntaxKind::MethodDeclaration => {
                if let Some(data) = self.get_method(node) {
                    add_opt(&mut children, data.return_type);
                    add_opt(&mut children, data.name);
                    add_list(&mut children, &data.parameters);
                    add_opt(&mut children, data.body);
                }
            }
            SyntaxKind::FieldDeclaration
            | SyntaxKind::Parameter
            | SyntaxKind::VariableDeclaration => {
                if let Some(data) = self.get_variable(node) {
                    add_opt(&mut children, data.type_ref);
                    add_opt(&mut children, data.name);
                    add_opt(&mut children, data.initializer);
                }
            }
            SyntaxKind::Block => {
                if let Some(data) = self.get_block(node) {
                    add_list(&mut children, &data.statements);
                }
            }
            SyntaxKind::ExpressionStatement => {
                if let Some(data) = self.get_expression_statement(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            SyntaxKind::AssignmentExpression => {
                if let Some(data) = self.get_assignment(node) {
                    add_opt(&mut children, data.left);
                    add_opt(&mut children, data.right);
                }
            }
            SyntaxKind::ReferenceExpression | SyntaxKind::TypeOrPackageReference => {
                if let Some(data) = self.get_reference(node) {
                    add_opt(&mut children, data.qualifier);
                }
            }
            SyntaxKind::ArrayType => {
                if let Some(data) = self.get_array_type(node) {
                    add_opt(&mut children, data.element);
                }
            }
            SyntaxKind::CallExpression => {
                if let Some(data) = self.get_call(node) {
                    add_opt(&mut children, data.callee);
                    add_opt(&mut children, data.arguments);
                }
            }
            SyntaxKind::NewExpression => {
                if let Some(data) = self.get_new(node) {
                    add_opt(&mut children, data.type_ref);
                    add_opt(&mut children, data.arguments);
                }
            }
            SyntaxKind::ArgumentList => {
                if let Some(data) = self.get_argument_list(node) {
                    add_list(&mut children, &data.arguments);
                }
            }
            SyntaxKind::ListLiteral | SyntaxKind::MapLiteral => {
                if let Some(data) = self.get_collection_literal(node) {
                    add_list(&mut children, &data.elements);
                }
            }
            SyntaxKind::ParenthesizedExpression => {
                if let Some(data) = self.get_parenthesized(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            SyntaxKind::CastExpression => {
                if let Some(data) = self.get_cast(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.type_ref);
                }
            }
            SyntaxKind::ClosureExpression => {
                if let Some(data) = self.get_closure(node) {
                    add_list(&mut children, &data.parameters);
                    add_opt(&mut children, data.body);
                }
            }
            SyntaxKind::ForStatement => {
                if let Some(data) = self.get_for_statement(node) {
                    add_opt(&mut children, data.clause);
                    add_opt(&mut children, data.body);
                }
            }
            SyntaxKind::LegacyForClause => {
                if let Some(data) = self.get_legacy_for_clause(node) {
                    add_opt(&mut children, data.initializer);
                    add_opt(&mut children, data.condition);
                    add_opt(&mut children, data.update);
                }
            }
            SyntaxKind::ForInClause => {
                if let Some(data) = self.get_for_in_clause(node) {
                    add_opt(&mut children, data.variable);
                    add_opt(&mut children, data.iterable);
                }
            }
            SyntaxKind::PackageDeclaration
            | SyntaxKind::ImportDeclaration
            | SyntaxKind::PrimitiveType
            | SyntaxKind::Literal
            | SyntaxKind::Identifier
            | SyntaxKind::Unknown => {}
        }

        children
    }

    /// Every node reachable from `root`, parents before children.
    pub fn preorder(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            if self.get(idx).is_none() {
                continue;
            }
            order.push(idx);
            let children = self.get_children(idx);
            stack.extend(children.into_iter().rev());
        }
        order
    }
}

/// Iterator over the ancestors of a node, nearest first.
///
/// Stops after `MAX_PARENT_WALK` steps so a corrupted parent chain cannot loop forever.
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    current: NodeIndex,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if self.current.is_none() || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.current;
        self.current = self.arena.parent(current);
        Some(current)
    }
}
