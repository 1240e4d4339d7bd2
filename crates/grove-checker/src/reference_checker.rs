//! Reference checking.
//!
//! Value references report inaccessible symbols and inapplicable method calls.
//! Unresolved unqualified names are errors inside static members; elsewhere they are
//! reported only when they qualify another reference. Unresolved qualified names are
//! never reported.
//!
//! Type and package references report every unresolved or inaccessible name.

use crate::error_handler::RuleFault;
use crate::state::CheckerState;
use grove_binder::{Resolution, SymbolKind};
use grove_common::{HighlightKind, diagnostic_messages};
use grove_syntax::node::ReferenceData;
use grove_syntax::{Modifiers, NodeIndex, SyntaxKind};
use tracing::trace;

impl<'a> CheckerState<'a> {
    // =========================================================================
    // Value references
    // =========================================================================

    pub(crate) fn check_value_reference(
        &mut self,
        idx: NodeIndex,
        reference: &ReferenceData,
    ) -> Result<(), RuleFault> {
        let Some(name) = reference.reference_name() else {
            return Ok(());
        };
        let resolution = self.ctx.resolver.resolve_reference(idx);
        trace!(node = idx.0, name, ?resolution, "value reference");

        match resolution {
            Resolution::Inaccessible(_) => {
                self.warning_at_node(idx, &diagnostic_messages::CANNOT_ACCESS, &[name], Vec::new());
            }
            Resolution::Accessible(symbol) => {
                if self.ctx.resolver.symbol_kind(symbol) == Some(SymbolKind::Method) {
                    self.check_method_applicability(idx, symbol, name)?;
                }
            }
            Resolution::Unresolved => {
                if reference.qualifier.is_none() {
                    self.report_unresolved_value(idx, name);
                }
            }
        }
        Ok(())
    }

    fn report_unresolved_value(&mut self, idx: NodeIndex, name: &str) {
        if self.is_in_static_member(idx) {
            self.error_at_node(
                idx,
                &diagnostic_messages::CANNOT_RESOLVE,
                &[name],
                HighlightKind::UnknownSymbol,
                Vec::new(),
            );
            return;
        }
        let arena = self.ctx.arena;
        if arena.kind(arena.parent(idx)) == Some(SyntaxKind::ReferenceExpression) {
            let fixes = self.ctx.import_fixes.import_fixes(idx);
            self.warning_at_node(idx, &diagnostic_messages::CANNOT_RESOLVE, &[name], fixes);
        }
    }

    /// Whether the nearest enclosing method or field is `static`.
    fn is_in_static_member(&self, idx: NodeIndex) -> bool {
        let arena = self.ctx.arena;
        arena
            .find_ancestor(
                idx,
                &[SyntaxKind::MethodDeclaration, SyntaxKind::FieldDeclaration],
            )
            .is_some_and(|member| arena.modifiers(member).contains(Modifiers::STATIC))
    }

    // =========================================================================
    // Type and package references
    // =========================================================================

    pub(crate) fn check_type_reference(
        &mut self,
        idx: NodeIndex,
        reference: &ReferenceData,
    ) -> Result<(), RuleFault> {
        let Some(name) = reference.reference_name() else {
            return Ok(());
        };
        match self.ctx.resolver.resolve_reference(idx) {
            Resolution::Unresolved => {
                let fixes = self.ctx.import_fixes.import_fixes(idx);
                self.error_at_node(
                    idx,
                    &diagnostic_messages::CANNOT_RESOLVE,
                    &[name],
                    HighlightKind::UnknownSymbol,
                    fixes,
                );
            }
            Resolution::Inaccessible(_) => {
                self.error_at_node(
                    idx,
                    &diagnostic_messages::CANNOT_ACCESS,
                    &[name],
                    HighlightKind::Generic,
                    Vec::new(),
                );
            }
            Resolution::Accessible(_) => {}
        }
        Ok(())
    }
}
