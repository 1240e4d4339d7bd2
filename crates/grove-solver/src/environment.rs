//! Declared types and signatures of library symbols.
//!
//! The host fills the environment for symbols that have no declaration in the bound
//! file (library fields, library method signatures). Source declarations are typed
//! from their syntax by the checker.

use crate::applicability::CallableSignature;
use crate::types::TypeId;
use grove_binder::SymbolId;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct TypeEnvironment {
    declared: FxHashMap<SymbolId, TypeId>,
    signatures: FxHashMap<SymbolId, CallableSignature>,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type of a field or variable symbol.
    pub fn set_declared_type(&mut self, symbol: SymbolId, ty: TypeId) {
        self.declared.insert(symbol, ty);
    }

    #[inline]
    pub fn declared_type(&self, symbol: SymbolId) -> Option<TypeId> {
        self.declared.get(&symbol).copied()
    }

    pub fn set_signature(&mut self, symbol: SymbolId, signature: CallableSignature) {
        self.signatures.insert(symbol, signature);
    }

    #[inline]
    pub fn signature(&self, symbol: SymbolId) -> Option<&CallableSignature> {
        self.signatures.get(&symbol)
    }
}
