//! Syntax tree model consumed by the grove annotator.
//!
//! Parsing is not part of this workspace: a parser (or a test fixture) populates a
//! [`NodeArena`] bottom-up through its `add_*` constructors, which also record parent
//! links. The annotator only ever borrows the arena.
//!
//! - `base` - `NodeIndex` / `NodeList` handles
//! - `node` - `SyntaxKind`, modifiers and per-kind node data
//! - `node_arena` - node construction
//! - `node_access` - typed accessors, parent walking and child enumeration

pub mod base;
pub mod node;
mod node_access;
mod node_arena;

pub use base::{NodeIndex, NodeList};
pub use node::{
    AssignmentOperator, LiteralKind, Modifiers, Node, NodeArena, PrimitiveKeyword, SyntaxKind,
    TypeDeclKind,
};
pub use node_access::Ancestors;
