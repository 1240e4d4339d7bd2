//! Nominal class hierarchy over class types.
//!
//! Every class registered here is "known": a subtype question involving only known
//! classes has a definite answer. Classes never registered are unknown and callers
//! treat relations involving them conservatively.

use crate::types::TypeId;
use dashmap::DashMap;
use grove_common::limits::MAX_HIERARCHY_WALK;
use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::SmallVec;

pub struct InheritanceGraph {
    parents: DashMap<TypeId, SmallVec<[TypeId; 4]>, FxBuildHasher>,
}

impl InheritanceGraph {
    /// An empty graph.
    pub fn new() -> Self {
        InheritanceGraph {
            parents: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// A graph seeded with the builtin `java.lang` / `java.util` / `groovy.lang` edges.
    pub fn with_builtins() -> Self {
        let graph = Self::new();
        graph.add_class(TypeId::OBJECT);
        graph.add_class(TypeId::SERIALIZABLE);
        graph.add_class(TypeId::CLONEABLE);
        graph.add_class(TypeId::COMPARABLE);
        graph.add_class(TypeId::CHAR_SEQUENCE);
        graph.add_class(TypeId::ITERABLE);
        graph.add_class(TypeId::MAP);

        graph.add_inheritance(TypeId::NUMBER, &[TypeId::SERIALIZABLE]);
        for boxed in [
            TypeId::BOXED_BYTE,
            TypeId::BOXED_SHORT,
            TypeId::INTEGER,
            TypeId::BOXED_LONG,
            TypeId::BOXED_FLOAT,
            TypeId::BOXED_DOUBLE,
            TypeId::BIG_INTEGER,
            TypeId::BIG_DECIMAL,
        ] {
            graph.add_inheritance(boxed, &[TypeId::NUMBER, TypeId::COMPARABLE]);
        }
        graph.add_inheritance(
            TypeId::BOXED_BOOLEAN,
            &[TypeId::SERIALIZABLE, TypeId::COMPARABLE],
        );
        graph.add_inheritance(
            TypeId::CHARACTER,
            &[TypeId::SERIALIZABLE, TypeId::COMPARABLE],
        );
        graph.add_inheritance(
            TypeId::STRING,
            &[TypeId::CHAR_SEQUENCE, TypeId::COMPARABLE, TypeId::SERIALIZABLE],
        );
        graph.add_inheritance(
            TypeId::GSTRING,
            &[TypeId::CHAR_SEQUENCE, TypeId::COMPARABLE, TypeId::SERIALIZABLE],
        );
        graph.add_inheritance(TypeId::CLOSURE, &[TypeId::CLONEABLE, TypeId::SERIALIZABLE]);
        graph.add_inheritance(TypeId::COLLECTION, &[TypeId::ITERABLE]);
        graph.add_inheritance(TypeId::LIST, &[TypeId::COLLECTION]);
        graph.add_inheritance(
            TypeId::ARRAY_LIST,
            &[TypeId::LIST, TypeId::CLONEABLE, TypeId::SERIALIZABLE],
        );
        graph.add_inheritance(
            TypeId::LINKED_HASH_MAP,
            &[TypeId::MAP, TypeId::CLONEABLE, TypeId::SERIALIZABLE],
        );
        graph
    }

    /// Register a class without (further) supertypes.
    pub fn add_class(&self, class: TypeId) {
        self.parents.entry(class).or_default();
    }

    /// Record that `child` directly extends or implements each of `parents`.
    pub fn add_inheritance(&self, child: TypeId, parents: &[TypeId]) {
        let mut entry = self.parents.entry(child).or_default();
        for &parent in parents {
            if parent != child && !entry.contains(&parent) {
                entry.push(parent);
            }
        }
    }

    #[inline]
    pub fn is_known(&self, class: TypeId) -> bool {
        self.parents.contains_key(&class)
    }

    /// Direct supertypes of `class`.
    pub fn parents_of(&self, class: TypeId) -> SmallVec<[TypeId; 4]> {
        self.parents
            .get(&class)
            .map(|parents| parents.clone())
            .unwrap_or_default()
    }

    /// Whether `child` is `ancestor` or reaches it through the graph.
    ///
    /// Every known class derives from `java.lang.Object`.
    pub fn is_derived_from(&self, child: TypeId, ancestor: TypeId) -> bool {
        if child == ancestor {
            return true;
        }
        if ancestor == TypeId::OBJECT && self.is_known(child) {
            return true;
        }

        let mut visited = FxHashSet::default();
        let mut stack: SmallVec<[TypeId; 16]> = SmallVec::new();
        stack.push(child);
        let mut steps = 0;
        while let Some(current) = stack.pop() {
            if steps >= MAX_HIERARCHY_WALK {
                break;
            }
            steps += 1;
            if !visited.insert(current) {
                continue;
            }
            for parent in self.parents_of(current) {
                if parent == ancestor {
                    return true;
                }
                stack.push(parent);
            }
        }
        false
    }

    /// Whether adding the edge `child -> parent` would close a cycle.
    pub fn detects_cycle(&self, child: TypeId, parent: TypeId) -> bool {
        self.is_derived_from(parent, child)
    }
}

impl Default for InheritanceGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/inheritance_tests.rs"]
mod tests;
