//! Tests for node construction, parent links and traversal.

use grove_common::Span;
use grove_syntax::{
    AssignmentOperator, LiteralKind, Modifiers, NodeArena, NodeIndex, SyntaxKind, TypeDeclKind,
};

/// class Foo { static void bar() { x = 1 } }
fn build_class(arena: &mut NodeArena) -> (NodeIndex, NodeIndex, NodeIndex) {
    let x = arena.add_reference_expression(Span::at(30, 1), NodeIndex::NONE, Some("x"), Span::at(30, 1));
    let one = arena.add_literal(Span::at(34, 1), LiteralKind::Integer, "1");
    let assign = arena.add_assignment(Span::new(30, 35), x, AssignmentOperator::Assign, one);
    let stmt = arena.add_expression_statement(Span::new(30, 35), assign);
    let block = arena.add_block(Span::new(28, 37), vec![stmt]);
    let name = arena.add_identifier(Span::at(22, 3), "bar");
    let method = arena.add_method(
        Span::new(12, 37),
        Modifiers::STATIC,
        name,
        NodeIndex::NONE,
        vec![],
        block,
    );
    let body = arena.add_class_body(Span::new(10, 39), vec![method]);
    let class_name = arena.add_identifier(Span::at(6, 3), "Foo");
    let class = arena.add_type_declaration(
        Span::new(0, 39),
        Modifiers::empty(),
        TypeDeclKind::Class,
        class_name,
        vec![],
        vec![],
        body,
    );
    (class, method, x)
}

#[test]
fn test_none_index_has_no_node() {
    let arena = NodeArena::new();
    assert!(NodeIndex::NONE.is_none());
    assert!(arena.get(NodeIndex::NONE).is_none());
    assert!(arena.get(NodeIndex(0)).is_none());
    assert_eq!(NodeIndex::default(), NodeIndex::NONE);
}

#[test]
fn test_parents_are_recorded_bottom_up() {
    let mut arena = NodeArena::new();
    let (class, method, x) = build_class(&mut arena);

    let ancestors: Vec<SyntaxKind> = arena
        .ancestors(x)
        .filter_map(|idx| arena.kind(idx))
        .collect();
    assert_eq!(
        ancestors,
        vec![
            SyntaxKind::AssignmentExpression,
            SyntaxKind::ExpressionStatement,
            SyntaxKind::Block,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::ClassBody,
            SyntaxKind::TypeDeclaration,
        ]
    );
    assert_eq!(
        arena.find_ancestor(x, &[SyntaxKind::MethodDeclaration, SyntaxKind::FieldDeclaration]),
        Some(method)
    );
    assert!(arena.parent(class).is_none());
}

#[test]
fn test_typed_getters_check_kind() {
    let mut arena = NodeArena::new();
    let (class, method, x) = build_class(&mut arena);

    let class_node = arena.get(class).unwrap();
    assert!(arena.get_type_decl(class_node).is_some());
    assert!(arena.get_method(class_node).is_none());
    assert_eq!(arena.declaration_name(class), Some("Foo"));
    assert_eq!(arena.declaration_name(method), Some("bar"));
    assert!(arena.modifiers(method).contains(Modifiers::STATIC));
    assert_eq!(
        arena.get_reference_at(x).and_then(|r| r.reference_name()),
        Some("x")
    );
}

#[test]
fn test_empty_reference_name_is_treated_as_missing() {
    let mut arena = NodeArena::new();
    let empty = arena.add_type_reference(Span::at(0, 0), NodeIndex::NONE, Some(""), Span::at(0, 0));
    let missing = arena.add_type_reference(Span::at(0, 0), NodeIndex::NONE, None, Span::at(0, 0));
    assert_eq!(arena.get_reference_at(empty).unwrap().reference_name(), None);
    assert_eq!(arena.get_reference_at(missing).unwrap().reference_name(), None);
}

#[test]
fn test_preorder_visits_parents_first_in_source_order() {
    let mut arena = NodeArena::new();
    let (class, _, _) = build_class(&mut arena);
    let order = arena.preorder(class);

    assert_eq!(order.len(), arena.len());
    assert_eq!(order[0], class);
    let kinds: Vec<SyntaxKind> = order.iter().filter_map(|&i| arena.kind(i)).collect();
    let assign_pos = kinds
        .iter()
        .position(|k| *k == SyntaxKind::AssignmentExpression)
        .unwrap();
    let literal_pos = kinds.iter().position(|k| *k == SyntaxKind::Literal).unwrap();
    assert!(assign_pos < literal_pos);
}

#[test]
fn test_compound_assignment_is_not_simple() {
    assert!(AssignmentOperator::Assign.is_simple());
    assert!(!AssignmentOperator::PlusAssign.is_simple());
    assert!(!AssignmentOperator::ElvisAssign.is_simple());
}
