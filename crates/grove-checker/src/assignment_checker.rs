//! Assignment checking.
//!
//! Only plain `=` is checked: compound operators (`+=`, `?=`, ...) read the target
//! first and their result type depends on operator overloading.

use crate::error_handler::RuleFault;
use crate::state::CheckerState;
use grove_common::diagnostic_messages;
use grove_solver::TypeId;
use grove_syntax::NodeIndex;
use grove_syntax::node::AssignmentData;
use tracing::trace;

impl<'a> CheckerState<'a> {
    pub(crate) fn check_assignment_expression(
        &mut self,
        idx: NodeIndex,
        assignment: &AssignmentData,
    ) -> Result<(), RuleFault> {
        if !assignment.operator.is_simple() {
            return Ok(());
        }
        let provider = self.ctx.type_provider;
        let Some(target) = provider.expression_type(assignment.left) else {
            trace!(node = idx.0, "assignment target type unknown");
            return Ok(());
        };
        let Some(source) = provider.expression_type(assignment.right) else {
            trace!(node = idx.0, "assignment source type unknown");
            return Ok(());
        };
        self.check_assignability(target, source, assignment.right);
        Ok(())
    }

    /// Warn at `anchor` when a `source` value cannot be stored in a `target` location.
    pub(crate) fn check_assignability(&mut self, target: TypeId, source: TypeId, anchor: NodeIndex) {
        if self.ctx.compat().is_assignable(target, source) {
            return;
        }
        let source_text = self.format_type(source);
        let target_text = self.format_type(target);
        self.warning_at_node(
            anchor,
            &diagnostic_messages::CANNOT_ASSIGN,
            &[&source_text, &target_text],
            Vec::new(),
        );
    }
}
