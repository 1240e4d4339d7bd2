//! Statement checking.

use crate::error_handler::RuleFault;
use crate::state::CheckerState;
use grove_common::{HighlightKind, diagnostic_messages};
use grove_syntax::NodeIndex;

impl<'a> CheckerState<'a> {
    /// C-style `for (init; cond; update)` headers are not supported by the dialect.
    pub(crate) fn check_legacy_for_clause(&mut self, idx: NodeIndex) -> Result<(), RuleFault> {
        self.error_at_node(
            idx,
            &diagnostic_messages::LEGACY_FOR_NOT_IMPLEMENTED,
            &[],
            HighlightKind::Generic,
            Vec::new(),
        );
        Ok(())
    }
}
