//! Declaration checking: variable initializers and nested type declarations.

use crate::error_handler::RuleFault;
use crate::state::CheckerState;
use grove_common::{HighlightKind, diagnostic_messages};
use grove_syntax::node::{TypeDeclData, VariableData};
use grove_syntax::{NodeIndex, SyntaxKind};

impl<'a> CheckerState<'a> {
    // =========================================================================
    // Variables
    // =========================================================================

    /// Locals, fields and parameters with a default value: the initializer must be
    /// assignable to the declared type.
    pub(crate) fn check_variable_declaration(
        &mut self,
        idx: NodeIndex,
        variable: &VariableData,
    ) -> Result<(), RuleFault> {
        if variable.initializer.is_none() {
            return Ok(());
        }
        let provider = self.ctx.type_provider;
        let Some(source) = provider.expression_type(variable.initializer) else {
            return Ok(());
        };
        let Some(target) = provider.declared_type(idx) else {
            return Ok(());
        };
        self.check_assignability(target, source, variable.initializer);
        Ok(())
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    /// Classes declared inside another class body are rejected.
    pub(crate) fn check_type_declaration(
        &mut self,
        idx: NodeIndex,
        declaration: &TypeDeclData,
    ) -> Result<(), RuleFault> {
        let arena = self.ctx.arena;
        if arena.kind(arena.parent(idx)) != Some(SyntaxKind::ClassBody) {
            return Ok(());
        }
        let anchor = if arena.get(declaration.name).is_some() {
            declaration.name
        } else {
            idx
        };
        self.error_at_node(
            anchor,
            &diagnostic_messages::INNER_CLASSES_NOT_SUPPORTED,
            &[],
            HighlightKind::Generic,
            Vec::new(),
        );
        Ok(())
    }
}
