//! Canonical type text for diagnostics.

use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId};

pub struct TypeFormatter<'a> {
    db: &'a TypeInterner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a TypeInterner) -> Self {
        TypeFormatter { db }
    }

    /// `int`, `java.lang.String`, `java.lang.String[][]`, `null`.
    pub fn format(&self, ty: TypeId) -> String {
        let mut dimensions = 0usize;
        let mut current = ty;
        let base = loop {
            match self.db.lookup(current) {
                Some(TypeData::Array(element)) if dimensions < grove_common::limits::MAX_HIERARCHY_WALK => {
                    dimensions += 1;
                    current = element;
                }
                Some(TypeData::Array(_)) => break "?".to_string(),
                Some(TypeData::Primitive(kind)) => break kind.keyword().to_string(),
                Some(TypeData::Null) => break "null".to_string(),
                Some(TypeData::Class(class)) => break class.qualified_name.to_string(),
                None => break format!("<type {}>", current.0),
            }
        };
        let mut text = base;
        for _ in 0..dimensions {
            text.push_str("[]");
        }
        text
    }
}
