//! Type interning.
//!
//! Structurally equal types share one `TypeId`. The interner is append-only and
//! safe to share between threads.

use crate::types::{ClassType, PRIMITIVES, PrimitiveKind, TypeData, TypeId, WELL_KNOWN_CLASSES};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU32, Ordering};

pub struct TypeInterner {
    ids: DashMap<TypeData, TypeId, FxBuildHasher>,
    types: DashMap<TypeId, TypeData, FxBuildHasher>,
    next_id: AtomicU32,
}

impl TypeInterner {
    /// Create an interner with the primitive, `null` and well-known class types registered.
    pub fn new() -> Self {
        let interner = TypeInterner {
            ids: DashMap::with_hasher(FxBuildHasher),
            types: DashMap::with_hasher(FxBuildHasher),
            next_id: AtomicU32::new(0),
        };
        for kind in PRIMITIVES {
            let id = interner.intern(TypeData::Primitive(kind));
            debug_assert_eq!(id, kind.type_id());
        }
        let null = interner.intern(TypeData::Null);
        debug_assert_eq!(null, TypeId::NULL);
        for &(expected, name) in WELL_KNOWN_CLASSES {
            let id = interner.intern(TypeData::Class(ClassType::new(name)));
            debug_assert_eq!(id, expected);
        }
        debug_assert_eq!(interner.len() as u32, TypeId::FIRST_DYNAMIC);
        interner
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(id) = self.ids.get(&data) {
            return *id;
        }
        match self.ids.entry(data) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = TypeId(self.next_id.fetch_add(1, Ordering::Relaxed));
                self.types.insert(id, entry.key().clone());
                entry.insert(id);
                id
            }
        }
    }

    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.types.get(&id).map(|data| data.clone())
    }

    #[inline]
    pub fn primitive(&self, kind: PrimitiveKind) -> TypeId {
        kind.type_id()
    }

    /// Class type for a qualified name.
    pub fn class(&self, qualified_name: &str) -> TypeId {
        self.intern(TypeData::Class(ClassType::new(qualified_name)))
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    /// Element type when `id` is an array.
    pub fn array_element(&self, id: TypeId) -> Option<TypeId> {
        match self.lookup(id)? {
            TypeData::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn primitive_kind(&self, id: TypeId) -> Option<PrimitiveKind> {
        match self.lookup(id)? {
            TypeData::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_class(&self, id: TypeId) -> bool {
        matches!(self.lookup(id), Some(TypeData::Class(_)))
    }

    /// Qualified name of a class type.
    pub fn class_name(&self, id: TypeId) -> Option<std::sync::Arc<str>> {
        match self.lookup(id)? {
            TypeData::Class(class) => Some(class.qualified_name),
            _ => None,
        }
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
