//! NodeArena creation methods (add_* methods).
//!
//! Nodes are created bottom-up: children first, then the parent, which adopts
//! every child it is given by writing its own index into the child's `parent`.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use grove_common::Span;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push_node(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        modifiers: Modifiers,
        data_index: usize,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            parent: NodeIndex::NONE,
            modifiers,
            data_index: data_index as u32,
        });
        index
    }

    fn adopt(&mut self, parent: NodeIndex, child: NodeIndex) {
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
    }

    fn adopt_all(&mut self, parent: NodeIndex, children: &NodeList) {
        for child in children.iter() {
            self.adopt(parent, child);
        }
    }

    pub fn add_identifier(&mut self, span: Span, text: &str) -> NodeIndex {
        self.identifiers.push(IdentifierData {
            text: text.to_string(),
        });
        self.push_node(
            SyntaxKind::Identifier,
            span,
            Modifiers::empty(),
            self.identifiers.len() - 1,
        )
    }

    pub fn add_source_file(
        &mut self,
        span: Span,
        file_name: &str,
        package: NodeIndex,
        imports: Vec<NodeIndex>,
        statements: Vec<NodeIndex>,
    ) -> NodeIndex {
        let imports = NodeList::from(imports);
        let statements = NodeList::from(statements);
        let index = self.push_node(
            SyntaxKind::SourceFile,
            span,
            Modifiers::empty(),
            self.source_files.len(),
        );
        self.adopt(index, package);
        self.adopt_all(index, &imports);
        self.adopt_all(index, &statements);
        self.source_files.push(SourceFileData {
            file_name: file_name.to_string(),
            package,
            imports,
            statements,
        });
        index
    }

    pub fn add_package(&mut self, span: Span, name: &str) -> NodeIndex {
        self.packages.push(PackageData {
            name: name.to_string(),
        });
        self.push_node(
            SyntaxKind::PackageDeclaration,
            span,
            Modifiers::empty(),
            self.packages.len() - 1,
        )
    }

    pub fn add_import(
        &mut self,
        span: Span,
        path: &str,
        on_demand: bool,
        is_static: bool,
        alias: Option<&str>,
    ) -> NodeIndex {
        self.imports.push(ImportData {
            path: path.to_string(),
            on_demand,
            is_static,
            alias: alias.map(str::to_string),
        });
        self.push_node(
            SyntaxKind::ImportDeclaration,
            span,
            Modifiers::empty(),
            self.imports.len() - 1,
        )
    }

    pub fn add_type_declaration(
        &mut self,
        span: Span,
        modifiers: Modifiers,
        kind: TypeDeclKind,
        name: NodeIndex,
        extends: Vec<NodeIndex>,
        implements: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        let extends = NodeList::from(extends);
        let implements = NodeList::from(implements);
        let index = self.push_node(
            SyntaxKind::TypeDeclaration,
            span,
            modifiers,
            self.type_decls.len(),
        );
        self.adopt(index, name);
        self.adopt_all(index, &extends);
        self.adopt_all(index, &implements);
        self.adopt(index, body);
        self.type_decls.push(TypeDeclData {
            kind,
            name,
            extends,
            implements,
            body,
        });
        index
    }

    pub fn add_class_body(&mut self, span: Span, members: Vec<NodeIndex>) -> NodeIndex {
        let members = NodeList::from(members);
        let index = self.push_node(
            SyntaxKind::ClassBody,
            span,
            Modifiers::empty(),
            self.class_bodies.len(),
        );
        self.adopt_all(index, &members);
        self.class_bodies.push(ClassBodyData { members });
        index
    }

    pub fn add_method(
        &mut self,
        span: Span,
        modifiers: Modifiers,
        name: NodeIndex,
        return_type: NodeIndex,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        let parameters = NodeList::from(parameters);
        let index = self.push_node(
            SyntaxKind::MethodDeclaration,
            span,
            modifiers,
            self.methods.len(),
        );
        self.adopt(index, name);
        self.adopt(index, return_type);
        self.adopt_all(index, &parameters);
        self.adopt(index, body);
        self.methods.push(MethodData {
            name,
            return_type,
            parameters,
            body,
        });
        index
    }

    fn add_variable_like(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        modifiers: Modifiers,
        name: NodeIndex,
        type_ref: NodeIndex,
        initializer: NodeIndex,
        is_varargs: bool,
    ) -> NodeIndex {
        let index = self.push_node(kind, span, modifiers, self.variables.len());
        self.adopt(index, name);
        self.adopt(index, type_ref);
        self.adopt(index, initializer);
        self.variables.push(VariableData {
            name,
            type_ref,
            initializer,
            is_varargs,
        });
        index
    }

    pub fn add_field(
        &mut self,
        span: Span,
        modifiers: Modifiers,
        name: NodeIndex,
        type_ref: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.add_variable_like(
            SyntaxKind::FieldDeclaration,
            span,
            modifiers,
            name,
            type_ref,
            initializer,
            false,
        )
    }

    pub fn add_parameter(
        &mut self,
        span: Span,
        name: NodeIndex,
        type_ref: NodeIndex,
        default_value: NodeIndex,
        is_varargs: bool,
    ) -> NodeIndex {
        self.add_variable_like(
            SyntaxKind::Parameter,
            span,
            Modifiers::empty(),
            name,
            type_ref,
            default_value,
            is_varargs,
        )
    }

    pub fn add_variable_declaration(
        &mut self,
        span: Span,
        modifiers: Modifiers,
        name: NodeIndex,
        type_ref: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.add_variable_like(
            SyntaxKind::VariableDeclaration,
            span,
            modifiers,
            name,
            type_ref,
            initializer,
            false,
        )
    }

    pub fn add_block(&mut self, span: Span, statements: Vec<NodeIndex>) -> NodeIndex {
        let statements = NodeList::from(statements);
        let index = self.push_node(
            SyntaxKind::Block,
            span,
            Modifiers::empty(),
            self.blocks.len(),
        );
        self.adopt_all(index, &statements);
        self.blocks.push(BlockData { statements });
        index
    }

    pub fn add_expression_statement(&mut self, span: Span, expression: NodeIndex) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::ExpressionStatement,
            span,
            Modifiers::empty(),
            self.expr_statements.len(),
        );
        self.adopt(index, expression);
        self.expr_statements
            .push(ExpressionStatementData { expression });
        index
    }

    pub fn add_assignment(
        &mut self,
        span: Span,
        left: NodeIndex,
        operator: AssignmentOperator,
        right: NodeIndex,
    ) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::AssignmentExpression,
            span,
            Modifiers::empty(),
            self.assignments.len(),
        );
        self.adopt(index, left);
        self.adopt(index, right);
        self.assignments.push(AssignmentData {
            left,
            operator,
            right,
        });
        index
    }

    fn add_reference_like(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        qualifier: NodeIndex,
        name: Option<&str>,
        name_span: Span,
    ) -> NodeIndex {
        let index = self.push_node(kind, span, Modifiers::empty(), self.references.len());
        self.adopt(index, qualifier);
        self.references.push(ReferenceData {
            qualifier,
            name: name.map(str::to_string),
            name_span,
        });
        index
    }

    /// `qualifier.name` in value position; `qualifier` may be `NONE`.
    pub fn add_reference_expression(
        &mut self,
        span: Span,
        qualifier: NodeIndex,
        name: Option<&str>,
        name_span: Span,
    ) -> NodeIndex {
        self.add_reference_like(
            SyntaxKind::ReferenceExpression,
            span,
            qualifier,
            name,
            name_span,
        )
    }

    /// `qualifier.name` in type position; `qualifier` may be `NONE`.
    pub fn add_type_reference(
        &mut self,
        span: Span,
        qualifier: NodeIndex,
        name: Option<&str>,
        name_span: Span,
    ) -> NodeIndex {
        self.add_reference_like(
            SyntaxKind::TypeOrPackageReference,
            span,
            qualifier,
            name,
            name_span,
        )
    }

    pub fn add_primitive_type(&mut self, span: Span, keyword: PrimitiveKeyword) -> NodeIndex {
        self.primitive_types.push(PrimitiveTypeData { keyword });
        self.push_node(
            SyntaxKind::PrimitiveType,
            span,
            Modifiers::empty(),
            self.primitive_types.len() - 1,
        )
    }

    pub fn add_array_type(&mut self, span: Span, element: NodeIndex) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::ArrayType,
            span,
            Modifiers::empty(),
            self.array_types.len(),
        );
        self.adopt(index, element);
        self.array_types.push(ArrayTypeData { element });
        index
    }

    pub fn add_call(&mut self, span: Span, callee: NodeIndex, arguments: NodeIndex) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::CallExpression,
            span,
            Modifiers::empty(),
            self.calls.len(),
        );
        self.adopt(index, callee);
        self.adopt(index, arguments);
        self.calls.push(CallData { callee, arguments });
        index
    }

    pub fn add_new(&mut self, span: Span, type_ref: NodeIndex, arguments: NodeIndex) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::NewExpression,
            span,
            Modifiers::empty(),
            self.news.len(),
        );
        self.adopt(index, type_ref);
        self.adopt(index, arguments);
        self.news.push(NewData {
            type_ref,
            arguments,
        });
        index
    }

    pub fn add_argument_list(&mut self, span: Span, arguments: Vec<NodeIndex>) -> NodeIndex {
        let arguments = NodeList::from(arguments);
        let index = self.push_node(
            SyntaxKind::ArgumentList,
            span,
            Modifiers::empty(),
            self.argument_lists.len(),
        );
        self.adopt_all(index, &arguments);
        self.argument_lists.push(ArgumentListData { arguments });
        index
    }

    pub fn add_literal(&mut self, span: Span, kind: LiteralKind, text: &str) -> NodeIndex {
        self.literals.push(LiteralData {
            kind,
            text: text.to_string(),
        });
        self.push_node(
            SyntaxKind::Literal,
            span,
            Modifiers::empty(),
            self.literals.len() - 1,
        )
    }

    fn add_collection_literal(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        elements: Vec<NodeIndex>,
    ) -> NodeIndex {
        let elements = NodeList::from(elements);
        let index = self.push_node(
            kind,
            span,
            Modifiers::empty(),
            self.collection_literals.len(),
        );
        self.adopt_all(index, &elements);
        self.collection_literals
            .push(CollectionLiteralData { elements });
        index
    }

    pub fn add_list_literal(&mut self, span: Span, elements: Vec<NodeIndex>) -> NodeIndex {
        self.add_collection_literal(SyntaxKind::ListLiteral, span, elements)
    }

    /// Entries are flattened `[key0, value0, key1, value1, ...]`.
    pub fn add_map_literal(&mut self, span: Span, entries: Vec<NodeIndex>) -> NodeIndex {
        self.add_collection_literal(SyntaxKind::MapLiteral, span, entries)
    }

    pub fn add_parenthesized(&mut self, span: Span, expression: NodeIndex) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::ParenthesizedExpression,
            span,
            Modifiers::empty(),
            self.parenthesized.len(),
        );
        self.adopt(index, expression);
        self.parenthesized.push(ParenthesizedData { expression });
        index
    }

    /// `expression as Type`.
    pub fn add_cast(&mut self, span: Span, expression: NodeIndex, type_ref: NodeIndex) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::CastExpression,
            span,
            Modifiers::empty(),
            self.casts.len(),
        );
        self.adopt(index, expression);
        self.adopt(index, type_ref);
        self.casts.push(CastData {
            expression,
            type_ref,
        });
        index
    }

    pub fn add_closure(
        &mut self,
        span: Span,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        let parameters = NodeList::from(parameters);
        let index = self.push_node(
            SyntaxKind::ClosureExpression,
            span,
            Modifiers::empty(),
            self.closures.len(),
        );
        self.adopt_all(index, &parameters);
        self.adopt(index, body);
        self.closures.push(ClosureData { parameters, body });
        index
    }

    pub fn add_for_statement(&mut self, span: Span, clause: NodeIndex, body: NodeIndex) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::ForStatement,
            span,
            Modifiers::empty(),
            self.for_statements.len(),
        );
        self.adopt(index, clause);
        self.adopt(index, body);
        self.for_statements.push(ForStatementData { clause, body });
        index
    }

    pub fn add_legacy_for_clause(
        &mut self,
        span: Span,
        initializer: NodeIndex,
        condition: NodeIndex,
        update: NodeIndex,
    ) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::LegacyForClause,
            span,
            Modifiers::empty(),
            self.legacy_for_clauses.len(),
        );
        self.adopt(index, initializer);
        self.adopt(index, condition);
        self.adopt(index, update);
        self.legacy_for_clauses.push(LegacyForClauseData {
            initializer,
            condition,
            update,
        });
        index
    }

    pub fn add_for_in_clause(
        &mut self,
        span: Span,
        variable: NodeIndex,
        iterable: NodeIndex,
    ) -> NodeIndex {
        let index = self.push_node(
            SyntaxKind::ForInClause,
            span,
            Modifiers::empty(),
            self.for_in_clauses.len(),
        );
        self.adopt(index, variable);
        self.adopt(index, iterable);
        self.for_in_clauses
            .push(ForInClauseData { variable, iterable });
        index
    }

    /// Node the parser could not classify.
    pub fn add_unknown(&mut self, span: Span) -> NodeIndex {
        self.push_node(SyntaxKind::Unknown, span, Modifiers::empty(), usize::MAX)
    }
}
