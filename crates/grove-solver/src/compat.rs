//! Assignability oracle.
//!
//! `CompatChecker::is_assignable(target, source)` answers whether a value of type
//! `source` may be stored in a location of type `target` under the dialect's
//! assignment conversions. The answer is `false` only when there are positive
//! grounds: both sides are understood and no conversion, coercion, upcast or
//! implicit downcast can make the assignment succeed.
//!
//! Conversions honored, in order:
//! - `null` and `void` values go anywhere except a `void` target;
//! - anything goes into `Object`, `String` (toString) and `boolean`/`Boolean` (truthiness);
//! - numeric targets take any numeric source (widening and narrowing alike), and
//!   `char`/`Character` additionally take strings;
//! - arrays convert element-wise, from collections and `Object`, and to `Cloneable`,
//!   `Serializable` and the collection interfaces;
//! - closures coerce to any non-numeric class (single-abstract-method coercion);
//! - lists and maps coerce to any non-numeric class (constructor coercion);
//! - classes unknown to the hierarchy are assumed compatible.

use crate::inheritance::InheritanceGraph;
use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId, is_numeric_class};
use grove_common::limits::MAX_HIERARCHY_WALK;
use tracing::trace;

pub struct CompatChecker<'a> {
    db: &'a TypeInterner,
    graph: &'a InheritanceGraph,
}

impl<'a> CompatChecker<'a> {
    pub fn new(db: &'a TypeInterner, graph: &'a InheritanceGraph) -> Self {
        CompatChecker { db, graph }
    }

    #[inline]
    pub fn interner(&self) -> &'a TypeInterner {
        self.db
    }

    pub fn is_assignable(&self, target: TypeId, source: TypeId) -> bool {
        let result = self.check(target, source, 0);
        trace!(target = target.0, source = source.0, result, "assignability");
        result
    }

    fn check(&self, target: TypeId, source: TypeId, depth: usize) -> bool {
        if target == source {
            return true;
        }
        if target == TypeId::VOID {
            return false;
        }
        if source == TypeId::NULL || source == TypeId::VOID || target == TypeId::OBJECT {
            return true;
        }
        let (Some(target_data), Some(source_data)) = (self.db.lookup(target), self.db.lookup(source))
        else {
            return true;
        };

        if self.is_numeric(target) {
            return self.into_numeric(target, source, &source_data);
        }
        if matches!(target, TypeId::STRING | TypeId::BOOLEAN | TypeId::BOXED_BOOLEAN) {
            return true;
        }

        match (&target_data, &source_data) {
            (TypeData::Array(target_elem), TypeData::Array(source_elem)) => {
                return self.array_elements(*target_elem, *source_elem, depth);
            }
            (TypeData::Array(_), _) => return self.into_array(source),
            (_, TypeData::Array(_)) => return self.from_array(target),
            (TypeData::Primitive(_), _) | (_, TypeData::Null) => return false,
            _ => {}
        }

        let source_class = self.boxed(source);
        if source_class == TypeId::CLOSURE {
            return true;
        }
        if self.graph.is_derived_from(source_class, TypeId::LIST)
            || self.graph.is_derived_from(source_class, TypeId::MAP)
        {
            return true;
        }
        self.related_classes(target, source_class)
    }

    fn into_numeric(&self, target: TypeId, source: TypeId, source_data: &TypeData) -> bool {
        if self.is_numeric(source) {
            return true;
        }
        if matches!(target, TypeId::CHAR | TypeId::CHARACTER)
            && matches!(source, TypeId::STRING | TypeId::GSTRING)
        {
            return true;
        }
        match source_data {
            TypeData::Class(_) => {
                // A supertype of the wrapper (Serializable, Comparable) may hold a number at runtime.
                !self.graph.is_known(source) || self.graph.is_derived_from(self.boxed(target), source)
            }
            TypeData::Primitive(_) | TypeData::Array(_) | TypeData::Null => false,
        }
    }

    fn array_elements(&self, target: TypeId, source: TypeId, depth: usize) -> bool {
        if target == source {
            return true;
        }
        if depth >= MAX_HIERARCHY_WALK {
            return true;
        }
        let (Some(target_data), Some(source_data)) = (self.db.lookup(target), self.db.lookup(source))
        else {
            return true;
        };
        match (target_data, source_data) {
            (TypeData::Primitive(_), _) | (_, TypeData::Primitive(_)) => false,
            (TypeData::Array(t), TypeData::Array(s)) => self.array_elements(t, s, depth + 1),
            (TypeData::Class(_), TypeData::Class(_)) => {
                target == TypeId::OBJECT || self.related_classes(target, source)
            }
            (TypeData::Class(_), TypeData::Array(_)) => {
                matches!(target, TypeId::OBJECT | TypeId::CLONEABLE | TypeId::SERIALIZABLE)
            }
            _ => false,
        }
    }

    fn into_array(&self, source: TypeId) -> bool {
        if !self.db.is_class(source) {
            return false;
        }
        !self.graph.is_known(source)
            || self.graph.is_derived_from(source, TypeId::COLLECTION)
            || matches!(source, TypeId::OBJECT | TypeId::CLONEABLE | TypeId::SERIALIZABLE)
    }

    fn from_array(&self, target: TypeId) -> bool {
        if !self.db.is_class(target) {
            return false;
        }
        matches!(target, TypeId::CLONEABLE | TypeId::SERIALIZABLE)
            || !self.graph.is_known(target)
            || self.graph.is_derived_from(TypeId::ARRAY_LIST, target)
    }

    /// Upcast, implicit downcast, or a class the hierarchy does not know.
    fn related_classes(&self, target: TypeId, source: TypeId) -> bool {
        if !self.graph.is_known(target) || !self.graph.is_known(source) {
            return true;
        }
        self.graph.is_derived_from(source, target) || self.graph.is_derived_from(target, source)
    }

    fn is_numeric(&self, ty: TypeId) -> bool {
        if is_numeric_class(ty) {
            return true;
        }
        self.db
            .primitive_kind(ty)
            .is_some_and(|kind| kind.is_numeric())
    }

    fn boxed(&self, ty: TypeId) -> TypeId {
        self.db
            .primitive_kind(ty)
            .and_then(|kind| kind.boxed())
            .unwrap_or(ty)
    }
}
