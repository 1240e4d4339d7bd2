//! Centralized limits for tree and hierarchy walks.
//!
//! Trees handed to the annotator come from a live editor and may be malformed
//! (dangling parents, self-parented nodes after a bad reparse). Every upward walk
//! and every hierarchy search is bounded by one of these constants.

/// Maximum number of ancestors visited when walking up from a node.
pub const MAX_PARENT_WALK: usize = 512;

/// Maximum number of classes visited when searching a supertype chain.
pub const MAX_HIERARCHY_WALK: usize = 256;

/// Maximum nesting of qualified references (`a.b.c.d...`) followed by the resolver.
pub const MAX_QUALIFIER_DEPTH: usize = 64;
