//! Binding of one source file into a symbol table.

use crate::symbols::{Arity, SymbolFlags, SymbolId, SymbolKind, SymbolTable};
use grove_syntax::{Modifiers, Node, NodeArena, NodeIndex, SyntaxKind, TypeDeclKind};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Symbols of the bound file on top of the host's library snapshot.
#[derive(Clone, Debug, Default)]
pub struct BinderState {
    pub symbols: SymbolTable,
    /// Declaration node -> symbol.
    pub node_symbols: FxHashMap<NodeIndex, SymbolId>,
    /// Parameterless closure -> its implicit `it` parameter.
    pub implicit_params: FxHashMap<NodeIndex, SymbolId>,
    /// Package of the bound file ("" for the default package).
    pub file_package: String,
    pub root: NodeIndex,
}

impl BinderState {
    pub fn new() -> Self {
        Self::with_symbols(SymbolTable::new())
    }

    /// Start from a table already populated with library classes.
    pub fn with_symbols(symbols: SymbolTable) -> Self {
        BinderState {
            symbols,
            node_symbols: FxHashMap::default(),
            implicit_params: FxHashMap::default(),
            file_package: String::new(),
            root: NodeIndex::NONE,
        }
    }

    #[inline]
    pub fn symbol_of(&self, declaration: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&declaration).copied()
    }

    /// Bind every declaration reachable from the `SourceFile` at `root`.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        let Some(node) = arena.get(root) else {
            return;
        };
        let Some(file) = arena.get_source_file(node) else {
            return;
        };
        self.root = root;
        self.file_package = arena
            .get(file.package)
            .and_then(|package| arena.get_package(package))
            .map(|package| package.name.clone())
            .unwrap_or_default();
        let package = self.symbols.add_package(&self.file_package);
        debug!(file = %file.file_name, package = %self.file_package, "binding source file");

        for statement in file.statements.iter() {
            self.bind_node(arena, statement, Some(package), None);
        }
    }

    fn bind_node(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        package: Option<SymbolId>,
        class: Option<SymbolId>,
    ) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        match node.kind {
            SyntaxKind::TypeDeclaration => self.bind_type_declaration(arena, node, idx, package, class),
            SyntaxKind::MethodDeclaration => {
                self.bind_method(arena, node, idx, class);
                self.bind_children(arena, idx, package, class);
            }
            SyntaxKind::FieldDeclaration => {
                self.declare(arena, node, idx, SymbolKind::Field, class, None);
                self.bind_children(arena, idx, package, class);
            }
            SyntaxKind::VariableDeclaration => {
                // Script-level declarations belong to the script, not a class.
                self.declare(arena, node, idx, SymbolKind::Variable, None, None);
                self.bind_children(arena, idx, package, class);
            }
            SyntaxKind::Parameter => {
                self.declare(arena, node, idx, SymbolKind::Parameter, None, None);
                self.bind_children(arena, idx, package, class);
            }
            SyntaxKind::ClosureExpression => {
                if let Some(closure) = arena.get_closure(node)
                    && closure.parameters.is_empty()
                {
                    let it = self.symbols.add_declared(
                        "it",
                        SymbolKind::Parameter,
                        SymbolFlags::empty(),
                        None,
                        idx,
                        None,
                    );
                    self.implicit_params.insert(idx, it);
                }
                self.bind_children(arena, idx, package, class);
            }
            _ => self.bind_children(arena, idx, package, class),
        }
    }

    fn bind_children(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        package: Option<SymbolId>,
        class: Option<SymbolId>,
    ) {
        for child in arena.get_children(idx) {
            self.bind_node(arena, child, package, class);
        }
    }

    fn bind_type_declaration(
        &mut self,
        arena: &NodeArena,
        node: &Node,
        idx: NodeIndex,
        package: Option<SymbolId>,
        outer: Option<SymbolId>,
    ) {
        let Some(decl) = arena.get_type_decl(node) else {
            return;
        };
        let mut flags = modifier_flags(node.modifiers);
        if matches!(decl.kind, TypeDeclKind::Interface | TypeDeclKind::Trait) {
            flags |= SymbolFlags::INTERFACE;
        }

        let class = arena.get_identifier_text(decl.name).map(|name| {
            let id = match outer {
                Some(outer) => self.symbols.add_nested_class(outer, name, flags, idx),
                None => {
                    let qualified = if self.file_package.is_empty() {
                        name.to_string()
                    } else {
                        format!("{}.{}", self.file_package, name)
                    };
                    self.symbols
                        .insert_class(name, &qualified, flags, package, idx)
                }
            };
            self.node_symbols.insert(idx, id);
            trace!(class = name, symbol = id.0, "bound class");
            id
        });

        // Members of a nameless class are still visited so their locals bind.
        self.bind_children(arena, idx, package, class.or(outer));
    }

    fn bind_method(
        &mut self,
        arena: &NodeArena,
        node: &Node,
        idx: NodeIndex,
        class: Option<SymbolId>,
    ) {
        let Some(method) = arena.get_method(node) else {
            return;
        };
        let mut arity = Arity::fixed(0);
        for param in method.parameters.iter() {
            let Some(data) = arena.get_variable_at(param) else {
                continue;
            };
            arity.total += 1;
            if data.initializer.is_none() && !data.is_varargs {
                arity.required += 1;
            }
            arity.varargs = data.is_varargs;
        }
        self.declare(arena, node, idx, SymbolKind::Method, class, Some(arity));
    }

    fn declare(
        &mut self,
        arena: &NodeArena,
        node: &Node,
        idx: NodeIndex,
        kind: SymbolKind,
        owner: Option<SymbolId>,
        arity: Option<Arity>,
    ) {
        let Some(name) = arena.declaration_name(idx) else {
            return;
        };
        let mut flags = modifier_flags(node.modifiers);
        if arity.is_some_and(|arity| arity.varargs) {
            flags |= SymbolFlags::VARARGS;
        }
        let id = self
            .symbols
            .add_declared(name, kind, flags, owner, idx, arity);
        self.node_symbols.insert(idx, id);
    }
}

fn modifier_flags(modifiers: Modifiers) -> SymbolFlags {
    let mut flags = SymbolFlags::empty();
    if modifiers.contains(Modifiers::STATIC) {
        flags |= SymbolFlags::STATIC;
    }
    if modifiers.contains(Modifiers::PRIVATE) {
        flags |= SymbolFlags::PRIVATE;
    }
    if modifiers.contains(Modifiers::PROTECTED) {
        flags |= SymbolFlags::PROTECTED;
    }
    flags
}
