//! Tests for node classification and the annotator entry point.


use grove_binder::{Resolution, SymbolId, SymbolKind};
use grove_checker::{
    Anchor, Annotator, BundleFormatter, CheckerContext, CheckerOptions, DiagnosticCollector,
    DiagnosticSink, FixHandle, NodeKind, ReferenceResolver, RenderedMessage, RuleFault,
    TypeProvider,
};
use grove_common::{HighlightKind, diagnostic_codes};
use grove_solver::{CallableSignature, InheritanceGraph, ParamInfo, TypeId, TypeInterner};
use grove_syntax::{AssignmentOperator, Modifiers, NodeIndex, PrimitiveKeyword, SyntaxKind};
use test_fixtures::{Session, Tree, check, init_tracing};

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_classify_checked_kinds() {
    let mut t = Tree::new();
    let type_ref = t.ty("String");
    let value = t.value(NodeIndex::NONE, "x");
    let init = t.int();
    let local = t.local("x", NodeIndex::NONE, init);
    let param = t.param("p", NodeIndex::NONE, NodeIndex::NONE);
    let field = t.field(Modifiers::empty(), "f", NodeIndex::NONE, NodeIndex::NONE);
    let target = t.value(NodeIndex::NONE, "x");
    let one = t.int();
    let assignment = t.assign(target, AssignmentOperator::Assign, one);
    let class = t.class("Thing", vec![], vec![]);
    let (for_stmt, clause) = t.legacy_for(vec![]);
    let literal = t.string();
    let arena = &t.arena;

    assert!(matches!(
        NodeKind::classify(arena, type_ref),
        Ok(NodeKind::TypeOrPackageReference(data)) if data.reference_name() == Some("String")
    ));
    assert!(matches!(
        NodeKind::classify(arena, value),
        Ok(NodeKind::ValueReference(data)) if data.reference_name() == Some("x")
    ));
    for declaration in [local, param, field] {
        assert!(matches!(
            NodeKind::classify(arena, declaration),
            Ok(NodeKind::VariableDeclaration(_))
        ));
    }
    assert!(matches!(
        NodeKind::classify(arena, assignment),
        Ok(NodeKind::AssignmentExpression(data)) if data.right == one
    ));
    assert!(matches!(
        NodeKind::classify(arena, class),
        Ok(NodeKind::TypeDeclaration(_))
    ));
    assert_eq!(
        NodeKind::classify(arena, clause),
        Ok(NodeKind::LegacyForClause)
    );
    for other in [for_stmt, literal, NodeIndex::NONE, NodeIndex(10_000)] {
        assert_eq!(NodeKind::classify(arena, other), Ok(NodeKind::Other));
    }
}

#[test]
fn test_classify_reports_malformed_node() {
    let mut t = Tree::new();
    let reference = t.value(NodeIndex::NONE, "x");
    if let Some(node) = t.arena.get_mut(reference) {
        node.data_index = u32::MAX;
    }

    assert_eq!(
        NodeKind::classify(&t.arena, reference),
        Err(RuleFault::MalformedNode {
            node: reference,
            kind: SyntaxKind::ReferenceExpression,
        })
    );
}

#[test]
fn test_malformed_node_is_dropped_and_siblings_still_checked() {
    // class Outer { class Inner {} }, plus a reference whose data went missing
    let mut t = Tree::new();
    let broken = t.value(NodeIndex::NONE, "broken");
    let stmt = t.stmt(broken);
    let inner_name = t.ident("Inner");
    let inner = t.class_named(inner_name, vec![], vec![]);
    let outer = t.class("Outer", vec![], vec![inner]);
    let root = t.file(None, vec![], vec![stmt, outer]);
    if let Some(node) = t.arena.get_mut(broken) {
        node.data_index = u32::MAX;
    }

    let diagnostics = check(&t, root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    assert_eq!(diagnostics[0].anchor.node, inner_name);
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn test_legacy_for_clause_is_reported_once() {
    // for (def i; i; i) {}
    let mut t = Tree::new();
    let (for_stmt, clause) = t.legacy_for(vec![]);
    let root = t.file(None, vec![], vec![for_stmt]);

    let diagnostics = check(&t, root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.message.code, diagnostic_codes::LEGACY_FOR_NOT_IMPLEMENTED);
    assert_eq!(
        diagnostic.message.text,
        "\"Traditional\" for-loop clause is not implemented in the language yet"
    );
    assert_eq!(diagnostic.highlight, HighlightKind::Generic);
    assert_eq!(diagnostic.anchor.node, clause);
    assert_eq!(Some(diagnostic.anchor.span), t.arena.span(clause));
}

// =============================================================================
// Annotator
// =============================================================================

/// A file with one diagnostic of each rule family.
fn mixed_file(t: &mut Tree) -> NodeIndex {
    let int_type = t.prim(PrimitiveKeyword::Int);
    let text = t.string();
    let decl = t.local("x", int_type, text);
    let widget = t.ty("Widget");
    let w = t.local("w", widget, NodeIndex::NONE);
    let (for_stmt, _) = t.legacy_for(vec![]);
    let inner = t.class("Inner", vec![], vec![]);
    let outer = t.class("Outer", vec![], vec![inner]);
    t.file(None, vec![], vec![decl, w, for_stmt, outer])
}

#[test]
fn test_annotation_is_idempotent() {
    let mut t = Tree::new();
    let root = mixed_file(&mut t);
    let session = Session::bind(&t, root);

    let first = serde_json::to_string(&session.run(&t, root)).unwrap();
    let second = serde_json::to_string(&session.run(&t, root)).unwrap();

    assert_eq!(first, second);
    let codes: Vec<u32> = session
        .run(&t, root)
        .iter()
        .map(|d| d.message.code)
        .collect();
    assert_eq!(
        codes,
        vec![
            diagnostic_codes::CANNOT_ASSIGN,
            diagnostic_codes::CANNOT_RESOLVE,
            diagnostic_codes::LEGACY_FOR_NOT_IMPLEMENTED,
            diagnostic_codes::INNER_CLASSES_NOT_SUPPORTED,
        ]
    );
}

#[test]
fn test_nodes_can_be_annotated_in_any_order() {
    let mut t = Tree::new();
    let root = mixed_file(&mut t);
    let session = Session::bind(&t, root);

    let mut forward = session.with_annotator(&t, None, |annotator| {
        let mut collector = DiagnosticCollector::new();
        for node in t.arena.preorder(root) {
            annotator.annotate(node, &mut collector);
        }
        collector.into_diagnostics()
    });
    let mut backward = session.with_annotator(&t, None, |annotator| {
        let mut collector = DiagnosticCollector::new();
        for node in t.arena.preorder(root).into_iter().rev() {
            annotator.annotate(node, &mut collector);
        }
        collector.into_diagnostics()
    });

    forward.sort_by_key(|d| d.anchor.node);
    backward.sort_by_key(|d| d.anchor.node);
    assert_eq!(forward, backward);
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<String>,
}

impl DiagnosticSink for RecordingSink {
    fn report_error(
        &mut self,
        anchor: Anchor,
        message: RenderedMessage,
        highlight: HighlightKind,
        fixes: Vec<FixHandle>,
    ) {
        self.events.push(format!(
            "error {} {} {highlight:?} fixes={}",
            anchor.node.0,
            message.key,
            fixes.len()
        ));
    }

    fn report_warning(&mut self, anchor: Anchor, message: RenderedMessage, fixes: Vec<FixHandle>) {
        self.events.push(format!(
            "warning {} {} fixes={}",
            anchor.node.0,
            message.key,
            fixes.len()
        ));
    }
}

#[test]
fn test_host_sink_receives_reports_in_order() {
    let mut t = Tree::new();
    let root = mixed_file(&mut t);
    let session = Session::bind(&t, root);

    let mut sink = RecordingSink::default();
    session.with_annotator(&t, None, |annotator| annotator.annotate_tree(root, &mut sink));

    let collected = session.run(&t, root);
    assert_eq!(sink.events.len(), collected.len());
    assert!(sink.events[0].starts_with("warning"));
    assert!(sink.events[0].ends_with("cannot.assign fixes=0"));
    assert!(sink.events[1].starts_with("error"));
    assert!(sink.events[1].contains("cannot.resolve UnknownSymbol fixes=1"));
}

#[test]
fn test_collector_forward_drains_buffer() {
    let mut t = Tree::new();
    let root = mixed_file(&mut t);
    let session = Session::bind(&t, root);

    let mut buffer = DiagnosticCollector::new();
    session.with_annotator(&t, None, |annotator| annotator.annotate_tree(root, &mut buffer));
    assert_eq!(buffer.errors().count(), 3);
    assert_eq!(buffer.warnings().count(), 1);

    let mut target = DiagnosticCollector::new();
    buffer.forward_to(&mut target);

    assert!(buffer.is_empty());
    assert_eq!(target.len(), 4);
    assert_eq!(target.into_diagnostics(), session.run(&t, root));
}

// =============================================================================
// Host collaborators
// =============================================================================

#[test]
fn test_bundle_formatter_overrides_templates() {
    let mut t = Tree::new();
    let root = mixed_file(&mut t);
    let session = Session::bind(&t, root);
    let bundle = BundleFormatter::from_json(r#"{ "cannot.assign": "{0} does not fit {1}" }"#)
        .unwrap();

    let diagnostics = session.with_annotator(&t, Some(&bundle), |annotator| {
        annotator.collect_tree(root)
    });

    assert_eq!(diagnostics[0].message.text, "java.lang.String does not fit int");
    assert_eq!(diagnostics[0].message.key, "cannot.assign");
    // Keys without an override keep the built-in text.
    assert_eq!(diagnostics[1].message.text, "Cannot resolve symbol 'Widget'");
}

#[test]
fn test_options_from_json() {
    let options = CheckerOptions::from_json(r#"{ "isolate_rule_panics": false }"#).unwrap();
    assert!(!options.isolate_rule_panics);
    assert_eq!(options.default_imports, CheckerOptions::default().default_imports);

    let options = CheckerOptions::from_json("{}").unwrap();
    assert_eq!(options, CheckerOptions::default());

    assert!(CheckerOptions::from_json(r#"{ "default_imports": 3 }"#).is_err());
}

#[test]
fn test_default_imports_come_from_options() {
    // String s
    let mut t = Tree::new();
    let string_type = t.ty("String");
    let decl = t.local("s", string_type, NodeIndex::NONE);
    let root = t.file(None, vec![], vec![decl]);

    assert!(check(&t, root).is_empty());

    let options = CheckerOptions::from_json(r#"{ "default_imports": [] }"#).unwrap();
    let session = Session::bind_with_options(&t, root, options);
    let diagnostics = session.run(&t, root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    assert_eq!(diagnostics[0].anchor.node, string_type);
    assert_eq!(diagnostics[0].message.code, diagnostic_codes::CANNOT_RESOLVE);
}

#[test]
fn test_host_default_imports_reach_the_typer() {
    // Widget w
    let mut t = Tree::new();
    let widget_type = t.ty("Widget");
    let decl = t.local("w", widget_type, NodeIndex::NONE);
    let root = t.file(None, vec![], vec![decl]);

    assert_eq!(check(&t, root).len(), 1);

    let options =
        CheckerOptions::from_json(r#"{ "default_imports": ["java.lang.*", "ui.*"] }"#).unwrap();
    let session = Session::bind_with_options(&t, root, options);

    let diagnostics = session.run(&t, root);
    assert!(diagnostics.is_empty(), "{diagnostics:#?}");
    session.with_typer(&t, |typer| {
        assert_eq!(typer.declared_type(decl), Some(session.types.class("ui.Widget")));
    });
}

// =============================================================================
// Fault isolation
// =============================================================================

/// Resolves every reference to one accessible method.
struct OneMethod;

const METHOD: SymbolId = SymbolId(7);

impl ReferenceResolver for OneMethod {
    fn resolve_reference(&self, _reference: NodeIndex) -> Resolution {
        Resolution::Accessible(METHOD)
    }

    fn symbol_kind(&self, symbol: SymbolId) -> Option<SymbolKind> {
        (symbol == METHOD).then_some(SymbolKind::Method)
    }
}

/// `method(int)` called with a string; the argument list is `arguments`.
struct StringArgument {
    arguments: Option<NodeIndex>,
}

impl TypeProvider for StringArgument {
    fn expression_type(&self, _expression: NodeIndex) -> Option<TypeId> {
        None
    }

    fn declared_type(&self, _declaration: NodeIndex) -> Option<TypeId> {
        None
    }

    fn callable_signature(&self, _symbol: SymbolId) -> Option<CallableSignature> {
        Some(CallableSignature::new(
            vec![ParamInfo::required(Some(TypeId::INT))],
            None,
        ))
    }

    fn argument_types(&self, _reference: NodeIndex) -> Option<Vec<Option<TypeId>>> {
        Some(vec![Some(TypeId::STRING)])
    }

    fn arguments_element(&self, _reference: NodeIndex) -> Option<NodeIndex> {
        self.arguments
    }
}

/// Panics whenever a rule asks for a type.
struct Exploding;

impl TypeProvider for Exploding {
    fn expression_type(&self, _expression: NodeIndex) -> Option<TypeId> {
        panic!("type provider exploded")
    }

    fn declared_type(&self, _declaration: NodeIndex) -> Option<TypeId> {
        panic!("type provider exploded")
    }

    fn callable_signature(&self, _symbol: SymbolId) -> Option<CallableSignature> {
        None
    }

    fn argument_types(&self, _reference: NodeIndex) -> Option<Vec<Option<TypeId>>> {
        None
    }

    fn arguments_element(&self, _reference: NodeIndex) -> Option<NodeIndex> {
        None
    }
}

#[test]
fn test_missing_argument_list_drops_the_warning() {
    init_tracing();
    let mut t = Tree::new();
    let reference = t.value(NodeIndex::NONE, "method");
    let list = t.args(vec![]);
    let types = TypeInterner::new();
    let graph = InheritanceGraph::with_builtins();

    let without_list = StringArgument { arguments: None };
    let ctx = CheckerContext::new(&t.arena, &types, &graph, &OneMethod, &without_list);
    let mut sink = DiagnosticCollector::new();
    Annotator::new(ctx).annotate(reference, &mut sink);
    assert!(sink.is_empty());

    let with_list = StringArgument {
        arguments: Some(list),
    };
    let ctx = CheckerContext::new(&t.arena, &types, &graph, &OneMethod, &with_list);
    Annotator::new(ctx).annotate(reference, &mut sink);
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.diagnostics()[0].anchor.node, list);
    assert_eq!(
        sink.diagnostics()[0].message.text,
        "Method 'method' cannot be applied to the given arguments"
    );
}

#[test]
fn test_panicking_rule_is_isolated() {
    init_tracing();
    // x = 'text'; for (def i; i; i) {}
    let mut t = Tree::new();
    let target = t.value(NodeIndex::NONE, "x");
    let text = t.string();
    let assignment = t.assign(target, AssignmentOperator::Assign, text);
    let stmt = t.stmt(assignment);
    let (for_stmt, clause) = t.legacy_for(vec![]);
    let root = t.file(None, vec![], vec![stmt, for_stmt]);
    let types = TypeInterner::new();
    let graph = InheritanceGraph::with_builtins();

    let ctx = CheckerContext::new(&t.arena, &types, &graph, &OneMethod, &Exploding);
    let diagnostics = Annotator::new(ctx).collect_tree(root);

    assert_eq!(diagnostics.len(), 1, "{diagnostics:#?}");
    assert_eq!(diagnostics[0].anchor.node, clause);
}

#[test]
#[should_panic(expected = "type provider exploded")]
fn test_panics_propagate_when_isolation_is_off() {
    let mut t = Tree::new();
    let target = t.value(NodeIndex::NONE, "x");
    let text = t.string();
    let assignment = t.assign(target, AssignmentOperator::Assign, text);
    let types = TypeInterner::new();
    let graph = InheritanceGraph::with_builtins();
    let options = CheckerOptions {
        isolate_rule_panics: false,
        ..CheckerOptions::default()
    };

    let ctx = CheckerContext::new(&t.arena, &types, &graph, &OneMethod, &Exploding)
        .with_options(&options);
    let mut sink = DiagnosticCollector::new();
    Annotator::new(ctx).annotate(assignment, &mut sink);
}

#[test]
fn test_rule_fault_display() {
    let fault = RuleFault::MissingArguments {
        reference: NodeIndex(4),
    };
    assert_eq!(fault.node(), NodeIndex(4));
    assert_eq!(
        fault.to_string(),
        "call through reference 4 has no argument list"
    );

    let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
    let fault = RuleFault::from_panic(NodeIndex(2), payload.as_ref());
    assert_eq!(
        fault,
        RuleFault::Panicked {
            node: NodeIndex(2),
            message: "boom".to_string(),
        }
    );
}
