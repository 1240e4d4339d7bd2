//! Type representation.
//!
//! Class types are erased: type arguments are not tracked and a class type is
//! identified by its qualified name alone.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Interned type handle. Ids below [`TypeId::FIRST_DYNAMIC`] are fixed well-known types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const BOOLEAN: TypeId = TypeId(0);
    pub const CHAR: TypeId = TypeId(1);
    pub const BYTE: TypeId = TypeId(2);
    pub const SHORT: TypeId = TypeId(3);
    pub const INT: TypeId = TypeId(4);
    pub const LONG: TypeId = TypeId(5);
    pub const FLOAT: TypeId = TypeId(6);
    pub const DOUBLE: TypeId = TypeId(7);
    pub const VOID: TypeId = TypeId(8);
    pub const NULL: TypeId = TypeId(9);

    pub const OBJECT: TypeId = TypeId(10);
    pub const STRING: TypeId = TypeId(11);
    pub const GSTRING: TypeId = TypeId(12);
    pub const BOXED_BOOLEAN: TypeId = TypeId(13);
    pub const CHARACTER: TypeId = TypeId(14);
    pub const BOXED_BYTE: TypeId = TypeId(15);
    pub const BOXED_SHORT: TypeId = TypeId(16);
    pub const INTEGER: TypeId = TypeId(17);
    pub const BOXED_LONG: TypeId = TypeId(18);
    pub const BOXED_FLOAT: TypeId = TypeId(19);
    pub const BOXED_DOUBLE: TypeId = TypeId(20);
    pub const NUMBER: TypeId = TypeId(21);
    pub const BIG_INTEGER: TypeId = TypeId(22);
    pub const BIG_DECIMAL: TypeId = TypeId(23);
    pub const CLOSURE: TypeId = TypeId(24);
    pub const COLLECTION: TypeId = TypeId(25);
    pub const LIST: TypeId = TypeId(26);
    pub const MAP: TypeId = TypeId(27);
    pub const ARRAY_LIST: TypeId = TypeId(28);
    pub const LINKED_HASH_MAP: TypeId = TypeId(29);
    pub const CLONEABLE: TypeId = TypeId(30);
    pub const SERIALIZABLE: TypeId = TypeId(31);
    pub const CHAR_SEQUENCE: TypeId = TypeId(32);
    pub const COMPARABLE: TypeId = TypeId(33);
    pub const ITERABLE: TypeId = TypeId(34);

    /// First id handed out by the interner for non-builtin types.
    pub const FIRST_DYNAMIC: u32 = 35;

    #[inline]
    pub const fn is_well_known(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    /// `char` counts as numeric: it widens to `int` on assignment.
    pub const fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveKind::Boolean | PrimitiveKind::Void)
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }

    pub const fn type_id(self) -> TypeId {
        match self {
            PrimitiveKind::Boolean => TypeId::BOOLEAN,
            PrimitiveKind::Char => TypeId::CHAR,
            PrimitiveKind::Byte => TypeId::BYTE,
            PrimitiveKind::Short => TypeId::SHORT,
            PrimitiveKind::Int => TypeId::INT,
            PrimitiveKind::Long => TypeId::LONG,
            PrimitiveKind::Float => TypeId::FLOAT,
            PrimitiveKind::Double => TypeId::DOUBLE,
            PrimitiveKind::Void => TypeId::VOID,
        }
    }

    /// Wrapper class; `void` has none.
    pub const fn boxed(self) -> Option<TypeId> {
        match self {
            PrimitiveKind::Boolean => Some(TypeId::BOXED_BOOLEAN),
            PrimitiveKind::Char => Some(TypeId::CHARACTER),
            PrimitiveKind::Byte => Some(TypeId::BOXED_BYTE),
            PrimitiveKind::Short => Some(TypeId::BOXED_SHORT),
            PrimitiveKind::Int => Some(TypeId::INTEGER),
            PrimitiveKind::Long => Some(TypeId::BOXED_LONG),
            PrimitiveKind::Float => Some(TypeId::BOXED_FLOAT),
            PrimitiveKind::Double => Some(TypeId::BOXED_DOUBLE),
            PrimitiveKind::Void => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub qualified_name: Arc<str>,
}

impl ClassType {
    pub fn new(qualified_name: &str) -> Self {
        ClassType {
            qualified_name: Arc::from(qualified_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Primitive(PrimitiveKind),
    /// Type of the `null` literal.
    Null,
    Class(ClassType),
    /// Array of the element type.
    Array(TypeId),
}

pub(crate) const PRIMITIVES: [PrimitiveKind; 9] = [
    PrimitiveKind::Boolean,
    PrimitiveKind::Char,
    PrimitiveKind::Byte,
    PrimitiveKind::Short,
    PrimitiveKind::Int,
    PrimitiveKind::Long,
    PrimitiveKind::Float,
    PrimitiveKind::Double,
    PrimitiveKind::Void,
];

/// Builtin class types with fixed ids, in id order.
pub const WELL_KNOWN_CLASSES: &[(TypeId, &str)] = &[
    (TypeId::OBJECT, "java.lang.Object"),
    (TypeId::STRING, "java.lang.String"),
    (TypeId::GSTRING, "groovy.lang.GString"),
    (TypeId::BOXED_BOOLEAN, "java.lang.Boolean"),
    (TypeId::CHARACTER, "java.lang.Character"),
    (TypeId::BOXED_BYTE, "java.lang.Byte"),
    (TypeId::BOXED_SHORT, "java.lang.Short"),
    (TypeId::INTEGER, "java.lang.Integer"),
    (TypeId::BOXED_LONG, "java.lang.Long"),
    (TypeId::BOXED_FLOAT, "java.lang.Float"),
    (TypeId::BOXED_DOUBLE, "java.lang.Double"),
    (TypeId::NUMBER, "java.lang.Number"),
    (TypeId::BIG_INTEGER, "java.math.BigInteger"),
    (TypeId::BIG_DECIMAL, "java.math.BigDecimal"),
    (TypeId::CLOSURE, "groovy.lang.Closure"),
    (TypeId::COLLECTION, "java.util.Collection"),
    (TypeId::LIST, "java.util.List"),
    (TypeId::MAP, "java.util.Map"),
    (TypeId::ARRAY_LIST, "java.util.ArrayList"),
    (TypeId::LINKED_HASH_MAP, "java.util.LinkedHashMap"),
    (TypeId::CLONEABLE, "java.lang.Cloneable"),
    (TypeId::SERIALIZABLE, "java.io.Serializable"),
    (TypeId::CHAR_SEQUENCE, "java.lang.CharSequence"),
    (TypeId::COMPARABLE, "java.lang.Comparable"),
    (TypeId::ITERABLE, "java.lang.Iterable"),
];

/// Numeric reference types: boxed numerics, `Number` and the big-number classes.
pub const fn is_numeric_class(ty: TypeId) -> bool {
    matches!(
        ty,
        TypeId::CHARACTER
            | TypeId::BOXED_BYTE
            | TypeId::BOXED_SHORT
            | TypeId::INTEGER
            | TypeId::BOXED_LONG
            | TypeId::BOXED_FLOAT
            | TypeId::BOXED_DOUBLE
            | TypeId::NUMBER
            | TypeId::BIG_INTEGER
            | TypeId::BIG_DECIMAL
    )
}
