//! Tests for the symbol table and file binding.

use grove_binder::{Arity, BinderState, Resolution, SymbolFlags, SymbolId, SymbolKind, SymbolTable};
use grove_common::Span;
use grove_syntax::{Modifiers, NodeArena, NodeIndex, TypeDeclKind};

#[test]
fn test_add_class_registers_parent_packages() {
    let mut table = SymbolTable::new();
    let list = table.add_class("java.util.List", SymbolFlags::INTERFACE, &["java.util.Collection"]);

    assert!(table.package("java").is_some());
    assert!(table.package("java.util").is_some());
    assert_eq!(table.class("java.util.List"), Some(list));
    assert_eq!(table.package_name_of(list), "java.util");
    assert_eq!(table.classes_named("List"), &[list]);

    let symbol = table.get(list).unwrap();
    assert_eq!(symbol.kind, SymbolKind::Class);
    assert_eq!(symbol.name, "List");
    assert_eq!(symbol.supertypes, vec!["java.util.Collection".to_string()]);
}

#[test]
fn test_add_class_is_idempotent_per_qualified_name() {
    let mut table = SymbolTable::new();
    let first = table.add_class("a.B", SymbolFlags::empty(), &[]);
    let second = table.add_class("a.B", SymbolFlags::empty(), &[]);
    assert_eq!(first, second);
}

#[test]
fn test_members_keep_declaration_order() {
    let mut table = SymbolTable::new();
    let class = table.add_class("a.Util", SymbolFlags::empty(), &[]);
    let one = table.add_method(class, "run", SymbolFlags::empty(), Arity::fixed(1));
    let two = table.add_method(class, "run", SymbolFlags::empty(), Arity::fixed(2));
    let field = table.add_field(class, "count", SymbolFlags::STATIC);

    assert_eq!(table.members_named(class, "run"), &[one, two]);
    assert_eq!(table.members_named(class, "count"), &[field]);
    assert!(table.members_named(class, "missing").is_empty());
    assert!(table.get(field).unwrap().is_static());
}

#[test]
fn test_nested_class_qualified_name_and_outermost() {
    let mut table = SymbolTable::new();
    let outer = table.add_class("a.Outer", SymbolFlags::empty(), &[]);
    let inner = table.add_nested_class(outer, "Inner", SymbolFlags::empty(), NodeIndex::NONE);
    let member = table.add_field(inner, "x", SymbolFlags::PRIVATE);

    assert_eq!(table.get(inner).unwrap().qualified_name, "a.Outer.Inner");
    assert_eq!(table.class("a.Outer.Inner"), Some(inner));
    assert_eq!(table.outermost_class(member), Some(outer));
    assert_eq!(table.package_name_of(member), "a");
}

#[test]
fn test_arity_accepts() {
    let exact = Arity::fixed(2);
    assert!(exact.accepts(2));
    assert!(!exact.accepts(1));
    assert!(!exact.accepts(3));

    let defaults = Arity {
        required: 1,
        total: 3,
        varargs: false,
    };
    assert!(defaults.accepts(1));
    assert!(defaults.accepts(3));
    assert!(!defaults.accepts(0));

    let varargs = Arity {
        required: 1,
        total: 2,
        varargs: true,
    };
    assert!(varargs.accepts(1));
    assert!(varargs.accepts(5));
    assert!(!varargs.accepts(0));

    // m(int a, int b = 2, Integer... rest)
    let defaults_then_varargs = Arity {
        required: 1,
        total: 3,
        varargs: true,
    };
    assert!(defaults_then_varargs.accepts(1));
    assert!(defaults_then_varargs.accepts(4));
    assert!(!defaults_then_varargs.accepts(0));
}

#[test]
fn test_resolution_from_raw_skips_flag_when_absent() {
    let unresolved = Resolution::from_raw(None, |_| panic!("flag must not be read"));
    assert_eq!(unresolved, Resolution::Unresolved);
    assert_eq!(
        Resolution::from_raw(Some(SymbolId(3)), |_| false),
        Resolution::Inaccessible(SymbolId(3))
    );
    assert_eq!(
        Resolution::from_raw(Some(SymbolId(3)), |_| true).symbol(),
        Some(SymbolId(3))
    );
}

/// package app
/// class Outer { private static int count; class Inner {} def run(a, b = 1) { def local = 0; { -> } } }
#[test]
fn test_bind_source_file_declares_everything() {
    let mut arena = NodeArena::new();
    let s = Span::DUMMY;

    let count_name = arena.add_identifier(s, "count");
    let count = arena.add_field(
        s,
        Modifiers::PRIVATE | Modifiers::STATIC,
        count_name,
        NodeIndex::NONE,
        NodeIndex::NONE,
    );

    let inner_name = arena.add_identifier(s, "Inner");
    let inner_body = arena.add_class_body(s, vec![]);
    let inner = arena.add_type_declaration(
        s,
        Modifiers::empty(),
        TypeDeclKind::Class,
        inner_name,
        vec![],
        vec![],
        inner_body,
    );

    let a_name = arena.add_identifier(s, "a");
    let a = arena.add_parameter(s, a_name, NodeIndex::NONE, NodeIndex::NONE, false);
    let b_name = arena.add_identifier(s, "b");
    let b_default = arena.add_literal(s, grove_syntax::LiteralKind::Integer, "1");
    let b = arena.add_parameter(s, b_name, NodeIndex::NONE, b_default, false);
    let local_name = arena.add_identifier(s, "local");
    let zero = arena.add_literal(s, grove_syntax::LiteralKind::Integer, "0");
    let local = arena.add_variable_declaration(s, Modifiers::empty(), local_name, NodeIndex::NONE, zero);
    let closure = arena.add_closure(s, vec![], NodeIndex::NONE);
    let closure_stmt = arena.add_expression_statement(s, closure);
    let block = arena.add_block(s, vec![local, closure_stmt]);
    let run_name = arena.add_identifier(s, "run");
    let run = arena.add_method(s, Modifiers::empty(), run_name, NodeIndex::NONE, vec![a, b], block);

    let body = arena.add_class_body(s, vec![count, inner, run]);
    let outer_name = arena.add_identifier(s, "Outer");
    let outer = arena.add_type_declaration(
        s,
        Modifiers::empty(),
        TypeDeclKind::Class,
        outer_name,
        vec![],
        vec![],
        body,
    );
    let package = arena.add_package(s, "app");
    let root = arena.add_source_file(s, "Outer.groovy", package, vec![], vec![outer]);

    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let table = &binder.symbols;

    assert_eq!(binder.file_package, "app");
    let outer_sym = binder.symbol_of(outer).unwrap();
    assert_eq!(table.get(outer_sym).unwrap().qualified_name, "app.Outer");
    assert_eq!(table.class("app.Outer.Inner"), binder.symbol_of(inner));

    let count_sym = table.get(binder.symbol_of(count).unwrap()).unwrap();
    assert_eq!(count_sym.kind, SymbolKind::Field);
    assert!(count_sym.flags.contains(SymbolFlags::PRIVATE | SymbolFlags::STATIC));
    assert_eq!(count_sym.owner, Some(outer_sym));

    let run_sym = table.get(binder.symbol_of(run).unwrap()).unwrap();
    assert_eq!(
        run_sym.arity,
        Some(Arity {
            required: 1,
            total: 2,
            varargs: false
        })
    );
    assert_eq!(table.members_named(outer_sym, "run"), &[run_sym.id]);

    let local_sym = table.get(binder.symbol_of(local).unwrap()).unwrap();
    assert_eq!(local_sym.kind, SymbolKind::Variable);
    assert_eq!(local_sym.owner, None);
    assert_eq!(
        table.get(binder.symbol_of(a).unwrap()).unwrap().kind,
        SymbolKind::Parameter
    );
    assert!(binder.implicit_params.contains_key(&closure));
}

#[test]
fn test_bind_non_source_file_is_ignored() {
    let mut arena = NodeArena::new();
    let ident = arena.add_identifier(Span::DUMMY, "x");
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, ident);
    assert!(binder.node_symbols.is_empty());
    assert!(binder.symbols.is_empty());
}
