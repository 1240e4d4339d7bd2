//! Symbols and the symbol table.
//!
//! The table is a snapshot of everything the resolver can see: library classes
//! registered by the host plus the declarations bound from the current source file.

use bitflags::bitflags;
use grove_syntax::NodeIndex;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index of a symbol inside a [`SymbolTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Package,
    Class,
    Method,
    Field,
    Variable,
    Parameter,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SymbolFlags: u32 {
        const STATIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        /// Visible inside the declaring package only (library members without modifiers).
        const PACKAGE_PRIVATE = 1 << 3;
        /// Markup-builder style method whose calls accept arbitrary arguments.
        const BUILDER_METHOD = 1 << 4;
        const VARARGS = 1 << 5;
        const INTERFACE = 1 << 6;
    }
}

/// Parameter counts of a method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arity {
    /// Parameters without a default value.
    pub required: usize,
    pub total: usize,
    pub varargs: bool,
}

impl Arity {
    pub const fn fixed(count: usize) -> Self {
        Arity {
            required: count,
            total: count,
            varargs: false,
        }
    }

    /// Whether a call with `count` arguments can bind to this arity.
    ///
    /// `required` excludes the varargs parameter, so a varargs method takes any
    /// count from `required` up.
    pub const fn accepts(&self, count: usize) -> bool {
        if self.varargs {
            count >= self.required
        } else {
            count >= self.required && count <= self.total
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    pub flags: SymbolFlags,
    /// Declaring class, package or `None` for locals and top-level packages.
    pub owner: Option<SymbolId>,
    /// Dotted name for packages and classes, plain name otherwise.
    pub qualified_name: String,
    /// Declaring node in the bound file; `NONE` for library symbols.
    pub declaration: NodeIndex,
    /// Qualified names of direct supertypes of library classes.
    pub supertypes: Vec<String>,
    /// Present for methods.
    pub arity: Option<Arity>,
}

impl Symbol {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(SymbolFlags::STATIC)
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        self.kind == SymbolKind::Class
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        self.kind == SymbolKind::Method
    }
}

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    packages: FxHashMap<String, SymbolId>,
    classes: FxHashMap<String, SymbolId>,
    members: FxHashMap<SymbolId, IndexMap<String, SmallVec<[SymbolId; 2]>>>,
    classes_by_name: IndexMap<String, SmallVec<[SymbolId; 2]>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    fn alloc(&mut self, mut symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        symbol.id = id;
        if let Some(owner) = symbol.owner
            && symbol.kind != SymbolKind::Package
        {
            self.members
                .entry(owner)
                .or_default()
                .entry(symbol.name.clone())
                .or_default()
                .push(id);
        }
        self.symbols.push(symbol);
        id
    }

    fn blank(name: &str, kind: SymbolKind, flags: SymbolFlags, owner: Option<SymbolId>) -> Symbol {
        Symbol {
            id: SymbolId(u32::MAX),
            name: name.to_string(),
            kind,
            flags,
            owner,
            qualified_name: name.to_string(),
            declaration: NodeIndex::NONE,
            supertypes: Vec::new(),
            arity: None,
        }
    }

    /// Register a package and all of its parent packages. The empty name is the default package.
    pub fn add_package(&mut self, qualified_name: &str) -> SymbolId {
        if let Some(&id) = self.packages.get(qualified_name) {
            return id;
        }
        let (owner, simple) = match qualified_name.rsplit_once('.') {
            Some((parent, simple)) => (Some(self.add_package(parent)), simple),
            None => (None, qualified_name),
        };
        let mut symbol = Self::blank(simple, SymbolKind::Package, SymbolFlags::empty(), owner);
        symbol.qualified_name = qualified_name.to_string();
        let id = self.alloc(symbol);
        self.packages.insert(qualified_name.to_string(), id);
        id
    }

    /// Register a top-level library class `package.Name` with its direct supertypes.
    pub fn add_class(
        &mut self,
        qualified_name: &str,
        flags: SymbolFlags,
        supertypes: &[&str],
    ) -> SymbolId {
        let (package, simple) = qualified_name
            .rsplit_once('.')
            .unwrap_or(("", qualified_name));
        let package = self.add_package(package);
        let id = self.insert_class(simple, qualified_name, flags, Some(package), NodeIndex::NONE);
        if let Some(symbol) = self.symbols.get_mut(id.0 as usize) {
            symbol.supertypes = supertypes.iter().map(|s| (*s).to_string()).collect();
        }
        id
    }

    /// Register a class nested in `outer`.
    pub fn add_nested_class(
        &mut self,
        outer: SymbolId,
        name: &str,
        flags: SymbolFlags,
        declaration: NodeIndex,
    ) -> SymbolId {
        let qualified = match self.get(outer) {
            Some(outer) => format!("{}.{}", outer.qualified_name, name),
            None => name.to_string(),
        };
        self.insert_class(name, &qualified, flags, Some(outer), declaration)
    }

    pub(crate) fn insert_class(
        &mut self,
        name: &str,
        qualified_name: &str,
        flags: SymbolFlags,
        owner: Option<SymbolId>,
        declaration: NodeIndex,
    ) -> SymbolId {
        if let Some(&existing) = self.classes.get(qualified_name) {
            return existing;
        }
        let mut symbol = Self::blank(name, SymbolKind::Class, flags, owner);
        symbol.qualified_name = qualified_name.to_string();
        symbol.declaration = declaration;
        let id = self.alloc(symbol);
        self.classes.insert(qualified_name.to_string(), id);
        self.classes_by_name
            .entry(name.to_string())
            .or_default()
            .push(id);
        id
    }

    pub fn add_field(&mut self, owner: SymbolId, name: &str, flags: SymbolFlags) -> SymbolId {
        self.alloc(Self::blank(name, SymbolKind::Field, flags, Some(owner)))
    }

    pub fn add_method(
        &mut self,
        owner: SymbolId,
        name: &str,
        flags: SymbolFlags,
        arity: Arity,
    ) -> SymbolId {
        let mut symbol = Self::blank(name, SymbolKind::Method, flags, Some(owner));
        symbol.arity = Some(arity);
        if arity.varargs {
            symbol.flags |= SymbolFlags::VARARGS;
        }
        self.alloc(symbol)
    }

    /// Register a symbol declared by a node of the bound file.
    pub(crate) fn add_declared(
        &mut self,
        name: &str,
        kind: SymbolKind,
        flags: SymbolFlags,
        owner: Option<SymbolId>,
        declaration: NodeIndex,
        arity: Option<Arity>,
    ) -> SymbolId {
        let mut symbol = Self::blank(name, kind, flags, owner);
        symbol.declaration = declaration;
        symbol.arity = arity;
        self.alloc(symbol)
    }

    #[inline]
    pub fn package(&self, qualified_name: &str) -> Option<SymbolId> {
        self.packages.get(qualified_name).copied()
    }

    #[inline]
    pub fn class(&self, qualified_name: &str) -> Option<SymbolId> {
        self.classes.get(qualified_name).copied()
    }

    /// Every class with the given simple name, in registration order.
    pub fn classes_named(&self, name: &str) -> &[SymbolId] {
        self.classes_by_name
            .get(name)
            .map_or(&[], |ids| ids.as_slice())
    }

    /// Members of `owner` named `name`, in declaration order.
    pub fn members_named(&self, owner: SymbolId, name: &str) -> &[SymbolId] {
        self.members
            .get(&owner)
            .and_then(|members| members.get(name))
            .map_or(&[], |ids| ids.as_slice())
    }

    /// Dotted name of the package a symbol lives in ("" for the default package).
    pub fn package_name_of(&self, id: SymbolId) -> &str {
        let mut current = self.get(id);
        let mut remaining = grove_common::limits::MAX_HIERARCHY_WALK;
        while let Some(symbol) = current {
            if symbol.kind == SymbolKind::Package {
                return &symbol.qualified_name;
            }
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            current = symbol.owner.and_then(|owner| self.get(owner));
        }
        ""
    }

    /// The top-level class enclosing `id` (the class itself for top-level classes).
    pub fn outermost_class(&self, id: SymbolId) -> Option<SymbolId> {
        let mut outermost = None;
        let mut current = self.get(id);
        let mut remaining = grove_common::limits::MAX_HIERARCHY_WALK;
        while let Some(symbol) = current {
            if symbol.kind == SymbolKind::Class {
                outermost = Some(symbol.id);
            }
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            current = symbol.owner.and_then(|owner| self.get(owner));
        }
        outermost
    }
}
