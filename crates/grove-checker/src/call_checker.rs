//! Argument applicability for references that resolve to methods.

use crate::error_handler::RuleFault;
use crate::state::CheckerState;
use grove_binder::SymbolId;
use grove_common::diagnostic_messages;
use grove_solver::is_applicable;
use grove_syntax::NodeIndex;
use tracing::trace;

impl<'a> CheckerState<'a> {
    /// Warn at the argument list when the call through `reference` cannot bind to
    /// `method`. Builder methods, unknown signatures and references that are not
    /// callees are skipped.
    pub(crate) fn check_method_applicability(
        &mut self,
        reference: NodeIndex,
        method: SymbolId,
        name: &str,
    ) -> Result<(), RuleFault> {
        let provider = self.ctx.type_provider;
        let Some(signature) = provider.callable_signature(method) else {
            return Ok(());
        };
        if signature.is_builder {
            return Ok(());
        }
        let Some(argument_types) = provider.argument_types(reference) else {
            return Ok(());
        };

        let compat = self.ctx.compat();
        if is_applicable(&argument_types, &signature, &compat) {
            return Ok(());
        }
        trace!(reference = reference.0, method = method.0, "method not applicable");

        let arguments = provider
            .arguments_element(reference)
            .ok_or(RuleFault::MissingArguments { reference })?;
        self.warning_at_node(
            arguments,
            &diagnostic_messages::CANNOT_APPLY_METHOD,
            &[name],
            Vec::new(),
        );
        Ok(())
    }
}
