//! Quick-fix handles attached to diagnostics.

use crate::context::ImportFixProvider;
use grove_binder::{BinderState, SymbolFlags, SymbolKind};
use grove_syntax::{NodeArena, NodeIndex};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Opaque fix descriptor; the host turns it into an editor action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixHandle {
    /// Add `import <qualified_name>` to the file.
    AddImport { qualified_name: String },
}

impl FixHandle {
    pub fn add_import(qualified_name: impl Into<String>) -> Self {
        FixHandle::AddImport {
            qualified_name: qualified_name.into(),
        }
    }
}

/// Provider for hosts without import fixes.
pub struct NoImportFixes;

impl ImportFixProvider for NoImportFixes {
    fn import_fixes(&self, _reference: NodeIndex) -> Vec<FixHandle> {
        Vec::new()
    }
}

/// Offers an import for every known class outside the file's package whose simple
/// name matches the unresolved reference.
pub struct OuterImportsFixProvider<'a> {
    arena: &'a NodeArena,
    binder: &'a BinderState,
}

impl<'a> OuterImportsFixProvider<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState) -> Self {
        OuterImportsFixProvider { arena, binder }
    }
}

impl ImportFixProvider for OuterImportsFixProvider<'_> {
    fn import_fixes(&self, reference: NodeIndex) -> Vec<FixHandle> {
        let Some(name) = self
            .arena
            .get_reference_at(reference)
            .and_then(|data| data.reference_name())
        else {
            return Vec::new();
        };

        let table = &self.binder.symbols;
        let mut candidates: IndexSet<&str, FxBuildHasher> = IndexSet::default();
        for &class in table.classes_named(name) {
            let Some(symbol) = table.get(class) else {
                continue;
            };
            // Only top-level classes can be imported by qualified name here.
            let top_level = symbol
                .owner
                .and_then(|owner| table.get(owner))
                .is_some_and(|owner| owner.kind == SymbolKind::Package);
            if !top_level
                || symbol
                    .flags
                    .intersects(SymbolFlags::PRIVATE | SymbolFlags::PACKAGE_PRIVATE)
            {
                continue;
            }
            let package = table.package_name_of(class);
            if package.is_empty() || package == self.binder.file_package {
                continue;
            }
            candidates.insert(symbol.qualified_name.as_str());
        }
        trace!(name, count = candidates.len(), "import candidates");
        candidates.into_iter().map(FixHandle::add_import).collect()
    }
}
