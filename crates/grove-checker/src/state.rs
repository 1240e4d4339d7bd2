//! Per-node checker state.
//!
//! A `CheckerState` lives for one dispatch: it borrows the context and buffers the
//! diagnostics produced for a single node. Rule modules extend it with `impl` blocks.

use crate::context::CheckerContext;
use crate::sink::DiagnosticCollector;

pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
    pub diagnostics: DiagnosticCollector,
}

impl<'a> CheckerState<'a> {
    pub fn new(ctx: CheckerContext<'a>) -> Self {
        CheckerState {
            ctx,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    pub fn into_diagnostics(self) -> DiagnosticCollector {
        self.diagnostics
    }
}
