//! Diagnostic sink and the buffering collector.

use crate::fixes::FixHandle;
use grove_common::{DiagnosticCategory, HighlightKind, Span};
use grove_syntax::NodeIndex;
use serde::{Deserialize, Serialize};

/// Node a diagnostic is attached to, with its source range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub node: NodeIndex,
    pub span: Span,
}

/// A message resolved against the message table and rendered by the host formatter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub code: u32,
    pub key: String,
    pub args: Vec<String>,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub anchor: Anchor,
    pub message: RenderedMessage,
    pub highlight: HighlightKind,
    pub fixes: Vec<FixHandle>,
}

/// Receiver of diagnostics, owned by the caller of the annotator.
pub trait DiagnosticSink {
    fn report_error(
        &mut self,
        anchor: Anchor,
        message: RenderedMessage,
        highlight: HighlightKind,
        fixes: Vec<FixHandle>,
    );

    fn report_warning(&mut self, anchor: Anchor, message: RenderedMessage, fixes: Vec<FixHandle>);
}

/// Sink that keeps diagnostics in report order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Warning)
    }

    /// Replay every buffered diagnostic into `sink`, emptying the collector.
    pub fn forward_to(&mut self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in self.diagnostics.drain(..) {
            match diagnostic.category {
                DiagnosticCategory::Error => sink.report_error(
                    diagnostic.anchor,
                    diagnostic.message,
                    diagnostic.highlight,
                    diagnostic.fixes,
                ),
                DiagnosticCategory::Warning => {
                    sink.report_warning(diagnostic.anchor, diagnostic.message, diagnostic.fixes);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report_error(
        &mut self,
        anchor: Anchor,
        message: RenderedMessage,
        highlight: HighlightKind,
        fixes: Vec<FixHandle>,
    ) {
        self.diagnostics.push(Diagnostic {
            category: DiagnosticCategory::Error,
            anchor,
            message,
            highlight,
            fixes,
        });
    }

    fn report_warning(&mut self, anchor: Anchor, message: RenderedMessage, fixes: Vec<FixHandle>) {
        self.diagnostics.push(Diagnostic {
            category: DiagnosticCategory::Warning,
            anchor,
            message,
            highlight: HighlightKind::Generic,
            fixes,
        });
    }
}

#[cfg(test)]
#[path = "../tests/sink_tests.rs"]
mod tests;
