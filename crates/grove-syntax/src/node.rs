//! Node kinds, modifiers and per-kind node data.
//!
//! A [`Node`] is a thin header (kind, span, parent, modifiers) plus an index into
//! the typed data pool matching its kind. Pools live on [`NodeArena`].

use crate::base::{NodeIndex, NodeList};
use bitflags::bitflags;
use grove_common::Span;
use serde::{Deserialize, Serialize};

/// Syntax categories produced by the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum SyntaxKind {
    SourceFile,
    PackageDeclaration,
    ImportDeclaration,
    /// `class`, `interface`, `enum` or `trait` declaration.
    TypeDeclaration,
    ClassBody,
    MethodDeclaration,
    FieldDeclaration,
    Parameter,
    Block,
    /// Local variable declaration (`def x = 1`, `String s`).
    VariableDeclaration,
    ExpressionStatement,
    AssignmentExpression,
    /// Identifier used as a value, optionally qualified (`a.b`).
    ReferenceExpression,
    /// Type or package name in type position (`java.util.List`).
    TypeOrPackageReference,
    PrimitiveType,
    ArrayType,
    CallExpression,
    NewExpression,
    ArgumentList,
    Literal,
    ListLiteral,
    MapLiteral,
    ParenthesizedExpression,
    CastExpression,
    ClosureExpression,
    ForStatement,
    /// C-style `for (init; cond; update)` header.
    LegacyForClause,
    /// `for (x in xs)` header.
    ForInClause,
    Identifier,
    /// Anything the parser could not classify (error recovery).
    Unknown,
}

bitflags! {
    /// Declaration modifiers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u16 {
        const STATIC = 1 << 0;
        const PUBLIC = 1 << 1;
        const PRIVATE = 1 << 2;
        const PROTECTED = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Trait,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    PowerAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ElvisAssign,
}

impl AssignmentOperator {
    /// Plain `=`; every other operator reads the target before writing it.
    #[inline]
    pub const fn is_simple(self) -> bool {
        matches!(self, AssignmentOperator::Assign)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKeyword {
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

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    Integer,
    Long,
    /// Unsuffixed decimal (`1.5`), a `BigDecimal` in this dialect.
    Decimal,
    Double,
    Float,
    String,
    /// Interpolated string (`"${x}"`).
    GString,
    True,
    False,
    Null,
}

/// Thin node header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: SyntaxKind,
    pub span: Span,
    pub parent: NodeIndex,
    pub modifiers: Modifiers,
    /// Index into the pool for `kind`; `u32::MAX` for data-less nodes.
    pub data_index: u32,
}

impl Node {
    #[inline]
    pub const fn has_data(&self) -> bool {
        self.data_index != u32::MAX
    }
}

// =============================================================================
// Node data
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifierData {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFileData {
    pub file_name: String,
    pub package: NodeIndex,
    pub imports: NodeList,
    pub statements: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageData {
    /// Dotted package name.
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportData {
    /// Dotted path without the trailing `.*`.
    pub path: String,
    pub on_demand: bool,
    pub is_static: bool,
    pub alias: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDeclData {
    pub kind: TypeDeclKind,
    /// Identifier node; `NONE` when the parser recovered from a missing name.
    pub name: NodeIndex,
    pub extends: NodeList,
    pub implements: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassBodyData {
    pub members: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodData {
    pub name: NodeIndex,
    /// Type node; `NONE` for `def`.
    pub return_type: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
}

/// Shared by fields, parameters and local variable declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableData {
    pub name: NodeIndex,
    /// Type node; `NONE` for `def` / untyped.
    pub type_ref: NodeIndex,
    pub initializer: NodeIndex,
    /// Trailing `T... args` parameter.
    pub is_varargs: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentData {
    pub left: NodeIndex,
    pub operator: AssignmentOperator,
    pub right: NodeIndex,
}

/// Shared by `ReferenceExpression` and `TypeOrPackageReference`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceData {
    pub qualifier: NodeIndex,
    /// `None` when the parser produced a reference without a name (`a.` while typing).
    pub name: Option<String>,
    pub name_span: Span,
}

impl ReferenceData {
    /// The referenced name when present and non-empty.
    pub fn reference_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimitiveTypeData {
    pub keyword: PrimitiveKeyword,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayTypeData {
    pub element: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallData {
    pub callee: NodeIndex,
    /// `ArgumentList` node.
    pub arguments: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewData {
    pub type_ref: NodeIndex,
    pub arguments: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentListData {
    pub arguments: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralData {
    pub kind: LiteralKind,
    pub text: String,
}

/// Shared by list and map literals; map entries are stored as key/value pairs in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionLiteralData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastData {
    pub expression: NodeIndex,
    pub type_ref: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosureData {
    pub parameters: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForStatementData {
    pub clause: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyForClauseData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub update: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForInClauseData {
    /// `Parameter` node for the loop variable.
    pub variable: NodeIndex,
    pub iterable: NodeIndex,
}

// =============================================================================
// Arena
// =============================================================================

/// Owner of every node of one source file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub identifiers: Vec<IdentifierData>,
    pub source_files: Vec<SourceFileData>,
    pub packages: Vec<PackageData>,
    pub imports: Vec<ImportData>,
    pub type_decls: Vec<TypeDeclData>,
    pub class_bodies: Vec<ClassBodyData>,
    pub methods: Vec<MethodData>,
    pub variables: Vec<VariableData>,
    pub blocks: Vec<BlockData>,
    pub expr_statements: Vec<ExpressionStatementData>,
    pub assignments: Vec<AssignmentData>,
    pub references: Vec<ReferenceData>,
    pub primitive_types: Vec<PrimitiveTypeData>,
    pub array_types: Vec<ArrayTypeData>,
    pub calls: Vec<CallData>,
    pub news: Vec<NewData>,
    pub argument_lists: Vec<ArgumentListData>,
    pub literals: Vec<LiteralData>,
    pub collection_literals: Vec<CollectionLiteralData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub casts: Vec<CastData>,
    pub closures: Vec<ClosureData>,
    pub for_statements: Vec<ForStatementData>,
    pub legacy_for_clauses: Vec<LegacyForClauseData>,
    pub for_in_clauses: Vec<ForInClauseData>,
}
