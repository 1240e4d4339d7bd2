//! Symbol binding and reference resolution.
//!
//! - `symbols` - `SymbolId`, `Symbol`, `SymbolTable` (the project symbol index snapshot)
//! - `state_binding` - `BinderState`, which binds one source file into the table
//! - `resolution` - the three-way `Resolution` result
//! - `scope_resolver` - lexical scope, import and member resolution with accessibility

pub mod resolution;
pub mod scope_resolver;
pub mod state_binding;
pub mod symbols;

pub use resolution::Resolution;
pub use scope_resolver::{NoReceiverTypes, ReceiverTypes, ScopeResolver};
pub use state_binding::BinderState;
pub use symbols::{Arity, Symbol, SymbolFlags, SymbolId, SymbolKind, SymbolTable};

/// Imports every source file sees without declaring them.
pub const DEFAULT_IMPORTS: &[&str] = &[
    "java.lang.*",
    "java.util.*",
    "java.io.*",
    "java.net.*",
    "groovy.lang.*",
    "groovy.util.*",
    "java.math.BigInteger",
    "java.math.BigDecimal",
];
