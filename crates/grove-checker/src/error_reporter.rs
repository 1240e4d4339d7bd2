//! Diagnostic emission helpers.

use crate::fixes::FixHandle;
use crate::sink::{Anchor, DiagnosticSink, RenderedMessage};
use crate::state::CheckerState;
use grove_common::{DiagnosticMessage, HighlightKind, Span};
use grove_solver::TypeId;
use grove_syntax::NodeIndex;
use tracing::debug;

impl<'a> CheckerState<'a> {
    pub(crate) fn anchor(&self, node: NodeIndex) -> Anchor {
        Anchor {
            node,
            span: self.ctx.arena.span(node).unwrap_or(Span::DUMMY),
        }
    }

    pub(crate) fn render(&self, message: &DiagnosticMessage, args: &[&str]) -> RenderedMessage {
        RenderedMessage {
            code: message.code,
            key: message.key.to_string(),
            args: args.iter().map(|arg| (*arg).to_string()).collect(),
            text: self.ctx.formatter.format(message, args),
        }
    }

    /// Report an error at `node`.
    pub(crate) fn error_at_node(
        &mut self,
        node: NodeIndex,
        message: &DiagnosticMessage,
        args: &[&str],
        highlight: HighlightKind,
        fixes: Vec<FixHandle>,
    ) {
        let anchor = self.anchor(node);
        let rendered = self.render(message, args);
        debug!(node = node.0, code = message.code, text = %rendered.text, "error");
        self.diagnostics
            .report_error(anchor, rendered, highlight, fixes);
    }

    /// Report a warning at `node`.
    pub(crate) fn warning_at_node(
        &mut self,
        node: NodeIndex,
        message: &DiagnosticMessage,
        args: &[&str],
        fixes: Vec<FixHandle>,
    ) {
        let anchor = self.anchor(node);
        let rendered = self.render(message, args);
        debug!(node = node.0, code = message.code, text = %rendered.text, "warning");
        self.diagnostics.report_warning(anchor, rendered, fixes);
    }

    /// Canonical text of a type for message arguments.
    pub(crate) fn format_type(&self, ty: TypeId) -> String {
        self.ctx.type_formatter().format(ty)
    }
}
