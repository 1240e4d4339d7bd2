//! Outcome of resolving one reference.

use crate::symbols::SymbolId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Found and visible from the reference site.
    Accessible(SymbolId),
    /// Found, but access rules forbid using it here.
    Inaccessible(SymbolId),
    Unresolved,
}

impl Resolution {
    /// Build from a raw "element + accessibility flag" pair.
    ///
    /// The accessibility check only runs when an element was found.
    pub fn from_raw(
        element: Option<SymbolId>,
        is_accessible: impl FnOnce(SymbolId) -> bool,
    ) -> Self {
        match element {
            None => Resolution::Unresolved,
            Some(symbol) => {
                if is_accessible(symbol) {
                    Resolution::Accessible(symbol)
                } else {
                    Resolution::Inaccessible(symbol)
                }
            }
        }
    }

    #[inline]
    pub const fn symbol(self) -> Option<SymbolId> {
        match self {
            Resolution::Accessible(symbol) | Resolution::Inaccessible(symbol) => Some(symbol),
            Resolution::Unresolved => None,
        }
    }

    #[inline]
    pub const fn is_unresolved(self) -> bool {
        matches!(self, Resolution::Unresolved)
    }
}
