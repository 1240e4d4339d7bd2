//! Tests for variable initializers and nested type declarations.


use grove_common::{DiagnosticCategory, HighlightKind, diagnostic_codes};
use grove_syntax::{Modifiers, NodeIndex, PrimitiveKeyword};
use test_fixtures::{Tree, check};

// =============================================================================
// Variable declarations
// =============================================================================

#[test]
fn test_local_initializer_mismatch_warns_at_initializer() {
    // int x = 'text'
    let mut t = Tree::new();
    let int_type = t.prim(PrimitiveKeyword::Int);
    let init = t.string();
    let decl = t.local("x", int_type, init);
    let root = t.file(None, vec![], vec![decl]);

    let diagnostics = check(&t, root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Warning);
    assert_eq!(diagnostics[0].message.code, diagnostic_codes::CANNOT_ASSIGN);
    assert_eq!(diagnostics[0].anchor.node, init);
    assert_eq!(diagnostics[0].message.args, vec!["java.lang.String", "int"]);
}

#[test]
fn test_declaration_without_initializer_is_silent() {
    let mut t = Tree::new();
    let int_type = t.prim(PrimitiveKeyword::Int);
    let decl = t.local("x", int_type, NodeIndex::NONE);
    let root = t.file(None, vec![], vec![decl]);

    assert!(check(&t, root).is_empty());
}

#[test]
fn test_def_declaration_accepts_any_initializer() {
    // def x = 'text'; def y = [1]
    let mut t = Tree::new();
    let text = t.string();
    let x = t.local("x", NodeIndex::NONE, text);
    let one = t.int();
    let list = t.list(vec![one]);
    let y = t.local("y", NodeIndex::NONE, list);
    let root = t.file(None, vec![], vec![x, y]);

    assert!(check(&t, root).is_empty());
}

#[test]
fn test_compatible_initializers_are_silent() {
    // long n = 1; Integer boxed = 1; double d = 1; Object o = 'text'
    let mut t = Tree::new();
    let long_type = t.prim(PrimitiveKeyword::Long);
    let one = t.int();
    let n = t.local("n", long_type, one);
    let integer_type = t.ty("Integer");
    let one = t.int();
    let boxed = t.local("boxed", integer_type, one);
    let double_type = t.prim(PrimitiveKeyword::Double);
    let one = t.int();
    let d = t.local("d", double_type, one);
    let object_type = t.ty("Object");
    let text = t.string();
    let o = t.local("o", object_type, text);
    let root = t.file(None, vec![], vec![n, boxed, d, o]);

    let diagnostics = check(&t, root);
    assert!(diagnostics.is_empty(), "{diagnostics:#?}");
}

#[test]
fn test_field_initializer_mismatch_warns() {
    // class Counter { int count = 'zero' }
    let mut t = Tree::new();
    let int_type = t.prim(PrimitiveKeyword::Int);
    let init = t.string();
    let field = t.field(Modifiers::empty(), "count", int_type, init);
    let class = t.class("Counter", vec![], vec![field]);
    let root = t.file(None, vec![], vec![class]);

    let diagnostics = check(&t, root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    assert_eq!(diagnostics[0].anchor.node, init);
    assert_eq!(diagnostics[0].message.code, diagnostic_codes::CANNOT_ASSIGN);
}

#[test]
fn test_parameter_default_mismatch_warns() {
    // class Service { void take(int n = 'one') {} }
    let mut t = Tree::new();
    let int_type = t.prim(PrimitiveKeyword::Int);
    let default = t.string();
    let param = t.param("n", int_type, default);
    let void = t.prim(PrimitiveKeyword::Void);
    let method = t.method(Modifiers::empty(), "take", void, vec![param], vec![]);
    let class = t.class("Service", vec![], vec![method]);
    let root = t.file(None, vec![], vec![class]);

    let diagnostics = check(&t, root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    assert_eq!(diagnostics[0].anchor.node, default);
    assert_eq!(
        diagnostics[0].message.text,
        "Cannot assign 'java.lang.String' to 'int'"
    );
}

#[test]
fn test_local_inside_method_is_checked() {
    // class Service { void run() { boolean flag = 1; String s = 1 } }
    let mut t = Tree::new();
    let boolean_type = t.prim(PrimitiveKeyword::Boolean);
    let one = t.int();
    let flag = t.local("flag", boolean_type, one);
    let string_type = t.ty("String");
    let one = t.int();
    let s = t.local("s", string_type, one);
    let void = t.prim(PrimitiveKeyword::Void);
    let method = t.method(Modifiers::empty(), "run", void, vec![], vec![flag, s]);
    let class = t.class("Service", vec![], vec![method]);
    let root = t.file(None, vec![], vec![class]);

    // Booleans and strings accept anything.
    let diagnostics = check(&t, root);
    assert!(diagnostics.is_empty(), "{diagnostics:#?}");
}

// =============================================================================
// Type declarations
// =============================================================================

#[test]
fn test_inner_class_errors_at_its_name() {
    // class Outer { class Inner {} }
    let mut t = Tree::new();
    let inner_name = t.ident("Inner");
    let inner = t.class_named(inner_name, vec![], vec![]);
    let outer = t.class("Outer", vec![], vec![inner]);
    let root = t.file(None, vec![], vec![outer]);

    let diagnostics = check(&t, root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.category, DiagnosticCategory::Error);
    assert_eq!(diagnostic.message.code, diagnostic_codes::INNER_CLASSES_NOT_SUPPORTED);
    assert_eq!(diagnostic.message.text, "Inner classes are not supported");
    assert!(diagnostic.message.args.is_empty());
    assert_eq!(diagnostic.highlight, HighlightKind::Generic);
    assert_eq!(diagnostic.anchor.node, inner_name);
    assert_eq!(Some(diagnostic.anchor.span), t.arena.span(inner_name));
}

#[test]
fn test_top_level_classes_are_silent() {
    let mut t = Tree::new();
    let first = t.class("First", vec![], vec![]);
    let second = t.class("Second", vec![], vec![]);
    let root = t.file(Some("app"), vec![], vec![first, second]);

    assert!(check(&t, root).is_empty());
}

#[test]
fn test_each_nested_level_is_reported() {
    // class A { class B { class C {} } }
    let mut t = Tree::new();
    let c_name = t.ident("C");
    let c = t.class_named(c_name, vec![], vec![]);
    let b_name = t.ident("B");
    let b = t.class_named(b_name, vec![], vec![c]);
    let a = t.class("A", vec![], vec![b]);
    let root = t.file(None, vec![], vec![a]);

    let diagnostics = check(&t, root);

    let anchors: Vec<_> = diagnostics.iter().map(|d| d.anchor.node).collect();
    assert_eq!(anchors, vec![b_name, c_name]);
}

#[test]
fn test_nameless_inner_class_anchors_at_declaration() {
    let mut t = Tree::new();
    let inner = t.class_named(NodeIndex::NONE, vec![], vec![]);
    let outer = t.class("Outer", vec![], vec![inner]);
    let root = t.file(None, vec![], vec![outer]);

    let diagnostics = check(&t, root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    assert_eq!(diagnostics[0].anchor.node, inner);
    assert_eq!(
        diagnostics[0].message.code,
        diagnostic_codes::INNER_CLASSES_NOT_SUPPORTED
    );
}
