//! Adapter from raw host lookups to the tagged [`Resolution`].
//!
//! Hosts whose resolver answers with "an optional element plus an accessibility
//! flag" implement [`RawReferenceResolver`] and wrap it in [`ResolverAdapter`]. The
//! accessibility flag is only consulted when an element was found.

use crate::context::ReferenceResolver;
use grove_binder::{Resolution, SymbolId, SymbolKind};
use grove_syntax::NodeIndex;

pub trait RawReferenceResolver {
    fn resolve_element(&self, reference: NodeIndex) -> Option<SymbolId>;

    fn is_accessible(&self, reference: NodeIndex, element: SymbolId) -> bool;

    fn element_kind(&self, element: SymbolId) -> Option<SymbolKind>;
}

pub struct ResolverAdapter<R> {
    raw: R,
}

impl<R: RawReferenceResolver> ResolverAdapter<R> {
    pub fn new(raw: R) -> Self {
        ResolverAdapter { raw }
    }

    pub fn inner(&self) -> &R {
        &self.raw
    }
}

impl<R: RawReferenceResolver> ReferenceResolver for ResolverAdapter<R> {
    fn resolve_reference(&self, reference: NodeIndex) -> Resolution {
        Resolution::from_raw(self.raw.resolve_element(reference), |element| {
            self.raw.is_accessible(reference, element)
        })
    }

    fn symbol_kind(&self, symbol: SymbolId) -> Option<SymbolKind> {
        self.raw.element_kind(symbol)
    }
}

#[cfg(test)]
#[path = "../tests/resolver_adapter_tests.rs"]
mod tests;
