//! Population of the inheritance graph from bound symbols.

use grove_binder::ScopeResolver;
use grove_solver::{InheritanceGraph, TypeId, TypeInterner};
use smallvec::SmallVec;
use tracing::{debug, warn};

/// Register every class of the resolver's symbol table in `graph`, with its direct
/// supertypes (library supertypes and resolved `extends`/`implements` clauses).
///
/// Edges that would close a cycle are skipped.
pub fn register_class_hierarchy(
    graph: &InheritanceGraph,
    types: &TypeInterner,
    scopes: &ScopeResolver<'_>,
) {
    let table = scopes.symbols();
    let mut registered = 0usize;
    for symbol in table.iter().filter(|symbol| symbol.is_class()) {
        let class = types.class(&symbol.qualified_name);
        let mut parents: SmallVec<[TypeId; 4]> = SmallVec::new();
        for parent in scopes.supertypes_of(symbol.id) {
            let Some(parent_symbol) = table.get(parent) else {
                continue;
            };
            let parent = types.class(&parent_symbol.qualified_name);
            if graph.detects_cycle(class, parent) {
                warn!(
                    class = %symbol.qualified_name,
                    parent = %parent_symbol.qualified_name,
                    "skipping cyclic inheritance edge"
                );
                continue;
            }
            parents.push(parent);
        }
        graph.add_inheritance(class, &parents);
        registered += 1;
    }
    debug!(registered, "registered class hierarchy");
}
