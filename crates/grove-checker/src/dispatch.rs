//! Node dispatch.
//!
//! [`NodeKind::classify`] maps a node onto the closed set of checked categories and
//! [`CheckerState::check_node`] runs the one rule for that category. [`Annotator`] is
//! the host entry point: it runs the rule against a node-local buffer and forwards
//! the buffered diagnostics only when the rule finishes cleanly.

use crate::context::CheckerContext;
use crate::error_handler::RuleFault;
use crate::sink::{Diagnostic, DiagnosticCollector, DiagnosticSink};
use crate::state::CheckerState;
use grove_syntax::node::{AssignmentData, ReferenceData, TypeDeclData, VariableData};
use grove_syntax::{NodeArena, NodeIndex, SyntaxKind};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::error;

/// Checked node categories, carrying the node's data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind<'a> {
    TypeOrPackageReference(&'a ReferenceData),
    ValueReference(&'a ReferenceData),
    TypeDeclaration(&'a TypeDeclData),
    /// Locals, fields and parameters.
    VariableDeclaration(&'a VariableData),
    AssignmentExpression(&'a AssignmentData),
    LegacyForClause,
    Other,
}

impl<'a> NodeKind<'a> {
    pub fn classify(arena: &'a NodeArena, idx: NodeIndex) -> Result<Self, RuleFault> {
        let Some(node) = arena.get(idx) else {
            return Ok(NodeKind::Other);
        };
        let malformed = || RuleFault::MalformedNode {
            node: idx,
            kind: node.kind,
        };

        let kind = match node.kind {
            SyntaxKind::TypeOrPackageReference => {
                NodeKind::TypeOrPackageReference(arena.get_reference(node).ok_or_else(malformed)?)
            }
            SyntaxKind::ReferenceExpression => {
                NodeKind::ValueReference(arena.get_reference(node).ok_or_else(malformed)?)
            }
            SyntaxKind::TypeDeclaration => {
                NodeKind::TypeDeclaration(arena.get_type_decl(node).ok_or_else(malformed)?)
            }
            SyntaxKind::VariableDeclaration
            | SyntaxKind::FieldDeclaration
            | SyntaxKind::Parameter => {
                NodeKind::VariableDeclaration(arena.get_variable(node).ok_or_else(malformed)?)
            }
            SyntaxKind::AssignmentExpression => {
                NodeKind::AssignmentExpression(arena.get_assignment(node).ok_or_else(malformed)?)
            }
            SyntaxKind::LegacyForClause => NodeKind::LegacyForClause,
            SyntaxKind::SourceFile
            | SyntaxKind::PackageDeclaration
            | SyntaxKind::ImportDeclaration
            | SyntaxKind::ClassBody
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::Block
            | SyntaxKind::ExpressionStatement
            | SyntaxKind::PrimitiveType
            | SyntaxKind::ArrayType
            | SyntaxKind::CallExpression
            | SyntaxKind::NewExpression
            | SyntaxKind::ArgumentList
            | SyntaxKind::Literal
            | SyntaxKind::ListLiteral
            | SyntaxKind::MapLiteral
            | SyntaxKind::ParenthesizedExpression
            | SyntaxKind::CastExpression
            | SyntaxKind::ClosureExpression
            | SyntaxKind::ForStatement
            | SyntaxKind::ForInClause
            | SyntaxKind::Identifier
            | SyntaxKind::Unknown => NodeKind::Other,
        };
        Ok(kind)
    }
}

impl<'a> CheckerState<'a> {
    /// Run the rule for the node's category.
    pub fn check_node(&mut self, idx: NodeIndex) -> Result<(), RuleFault> {
        match NodeKind::classify(self.ctx.arena, idx)? {
            NodeKind::TypeOrPackageReference(data) => self.check_type_reference(idx, data),
            NodeKind::ValueReference(data) => self.check_value_reference(idx, data),
            NodeKind::TypeDeclaration(data) => self.check_type_declaration(idx, data),
            NodeKind::VariableDeclaration(data) => self.check_variable_declaration(idx, data),
            NodeKind::AssignmentExpression(data) => self.check_assignment_expression(idx, data),
            NodeKind::LegacyForClause => self.check_legacy_for_clause(idx),
            NodeKind::Other => Ok(()),
        }
    }
}

/// Host entry point. Holds no state between calls; any number of annotators may
/// share one context.
pub struct Annotator<'a> {
    ctx: CheckerContext<'a>,
}

impl<'a> Annotator<'a> {
    pub fn new(ctx: CheckerContext<'a>) -> Self {
        Annotator { ctx }
    }

    /// Check one node and report its diagnostics into `sink`.
    ///
    /// A rule fault or panic is logged and the node's diagnostics are dropped.
    #[tracing::instrument(level = "trace", skip_all, fields(node = node.0))]
    pub fn annotate(&self, node: NodeIndex, sink: &mut dyn DiagnosticSink) {
        let outcome = if self.ctx.options.isolate_rule_panics {
            catch_unwind(AssertUnwindSafe(|| self.run_rule(node)))
                .unwrap_or_else(|payload| Err(RuleFault::from_panic(node, payload.as_ref())))
        } else {
            self.run_rule(node)
        };

        match outcome {
            Ok(mut diagnostics) => diagnostics.forward_to(sink),
            Err(fault) => {
                error!(node = fault.node().0, %fault, "rule fault, node diagnostics dropped");
            }
        }
    }

    fn run_rule(&self, node: NodeIndex) -> Result<DiagnosticCollector, RuleFault> {
        let mut state = CheckerState::new(self.ctx);
        state.check_node(node)?;
        Ok(state.into_diagnostics())
    }

    /// Annotate every node under `root`, parents before children.
    pub fn annotate_tree(&self, root: NodeIndex, sink: &mut dyn DiagnosticSink) {
        for node in self.ctx.arena.preorder(root) {
            self.annotate(node, sink);
        }
    }

    /// Annotate the tree under `root` and return its diagnostics in report order.
    pub fn collect_tree(&self, root: NodeIndex) -> Vec<Diagnostic> {
        let mut collector = DiagnosticCollector::new();
        self.annotate_tree(root, &mut collector);
        collector.into_diagnostics()
    }
}
