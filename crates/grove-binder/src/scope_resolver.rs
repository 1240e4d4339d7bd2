//! Reference resolution over lexical scopes, imports and class members.
//!
//! Value references are looked up innermost-first: locals declared earlier in an
//! enclosing block, method and closure parameters, loop variables, members of the
//! enclosing classes (including inherited ones), script-level declarations and static
//! imports. Anything still unresolved falls back to type-name lookup so a class can be
//! used as a value (`Math.max(a, b)`).
//!
//! Type references go through enclosing classes, the file's own types, single-type
//! imports, the file's package, on-demand imports, the default imports and finally
//! top-level packages.

use crate::DEFAULT_IMPORTS;
use crate::resolution::Resolution;
use crate::state_binding::BinderState;
use crate::symbols::{SymbolFlags, SymbolId, SymbolKind, SymbolTable};
use grove_common::limits::{MAX_HIERARCHY_WALK, MAX_QUALIFIER_DEPTH};
use grove_syntax::{NodeArena, NodeIndex, SyntaxKind};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

/// Supplies the class of a value expression used as a qualifier (`list.size()`).
pub trait ReceiverTypes {
    fn receiver_class(&self, qualifier: NodeIndex) -> Option<SymbolId>;
}

/// Receiver hook for callers without an expression typer.
pub struct NoReceiverTypes;

impl ReceiverTypes for NoReceiverTypes {
    fn receiver_class(&self, _qualifier: NodeIndex) -> Option<SymbolId> {
        None
    }
}

pub struct ScopeResolver<'a> {
    arena: &'a NodeArena,
    binder: &'a BinderState,
    default_imports: Vec<String>,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState) -> Self {
        ScopeResolver {
            arena,
            binder,
            default_imports: DEFAULT_IMPORTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Replace the implicit imports; entries ending in `.*` are on-demand.
    #[must_use]
    pub fn with_default_imports(mut self, imports: &[String]) -> Self {
        self.default_imports = imports.to_vec();
        self
    }

    #[inline]
    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    #[inline]
    pub fn binder(&self) -> &'a BinderState {
        self.binder
    }

    #[inline]
    pub fn symbols(&self) -> &'a SymbolTable {
        &self.binder.symbols
    }

    pub fn resolve(&self, reference: NodeIndex) -> Resolution {
        self.resolve_with(reference, &NoReceiverTypes)
    }

    pub fn resolve_with(&self, reference: NodeIndex, receivers: &dyn ReceiverTypes) -> Resolution {
        let symbol = self.lookup(reference, receivers, 0);
        let resolution =
            Resolution::from_raw(symbol, |symbol| self.is_accessible(symbol, reference));
        trace!(reference = reference.0, ?resolution, "resolved reference");
        resolution
    }

    fn lookup(
        &self,
        reference: NodeIndex,
        receivers: &dyn ReceiverTypes,
        depth: usize,
    ) -> Option<SymbolId> {
        if depth > MAX_QUALIFIER_DEPTH {
            return None;
        }
        let node = self.arena.get(reference)?;
        let data = self.arena.get_reference(node)?;
        let name = data.reference_name()?;

        if data.qualifier.is_some() {
            return self.lookup_qualified(reference, data.qualifier, name, receivers, depth);
        }
        if node.kind == SyntaxKind::TypeOrPackageReference {
            return self.lookup_type(reference, name);
        }
        let arg_count = self.call_argument_count(reference);
        self.lookup_value(reference, name, arg_count, depth)
            .or_else(|| self.lookup_type(reference, name))
    }

    fn lookup_qualified(
        &self,
        reference: NodeIndex,
        qualifier: NodeIndex,
        name: &str,
        receivers: &dyn ReceiverTypes,
        depth: usize,
    ) -> Option<SymbolId> {
        let table = self.symbols();
        let is_reference = matches!(
            self.arena.kind(qualifier),
            Some(SyntaxKind::ReferenceExpression | SyntaxKind::TypeOrPackageReference)
        );

        let receiver = if is_reference {
            let resolved = self.lookup(qualifier, receivers, depth + 1)?;
            let symbol = table.get(resolved)?;
            match symbol.kind {
                SymbolKind::Package => {
                    let qualified = format!("{}.{}", symbol.qualified_name, name);
                    return table.class(&qualified).or_else(|| table.package(&qualified));
                }
                SymbolKind::Class => resolved,
                _ => receivers.receiver_class(qualifier)?,
            }
        } else {
            receivers.receiver_class(qualifier)?
        };

        let arg_count = self.call_argument_count(reference);
        self.find_member(receiver, name, arg_count, depth + 1)
    }

    fn lookup_value(
        &self,
        reference: NodeIndex,
        name: &str,
        arg_count: Option<usize>,
        depth: usize,
    ) -> Option<SymbolId> {
        let arena = self.arena;
        let mut child = reference;
        let mut inside_class = false;

        for ancestor in arena.ancestors(reference) {
            let Some(node) = arena.get(ancestor) else {
                break;
            };
            let found = match node.kind {
                SyntaxKind::Block => arena
                    .get_block(node)
                    .and_then(|block| self.declared_before(block.statements.iter(), child, name)),
                SyntaxKind::MethodDeclaration => arena
                    .get_method(node)
                    .and_then(|method| self.parameter_named(method.parameters.iter(), name)),
                SyntaxKind::ClosureExpression => arena.get_closure(node).and_then(|closure| {
                    if closure.parameters.is_empty() && name == "it" {
                        self.binder.implicit_params.get(&ancestor).copied()
                    } else {
                        self.parameter_named(closure.parameters.iter(), name)
                    }
                }),
                SyntaxKind::ForStatement => arena
                    .get_for_statement(node)
                    .and_then(|stmt| self.loop_variable(stmt.clause, name)),
                SyntaxKind::ClassBody => {
                    inside_class = true;
                    self.binder
                        .symbol_of(arena.parent(ancestor))
                        .and_then(|class| self.class_scope_member(class, name, arg_count, depth))
                }
                SyntaxKind::SourceFile if !inside_class => {
                    arena.get_source_file(node).and_then(|file| {
                        self.declared_before(file.statements.iter(), child, name)
                            .or_else(|| self.script_method(file.statements.iter(), name, arg_count))
                    })
                }
                _ => None,
            };
            if found.is_some() {
                return found;
            }
            child = ancestor;
        }

        self.static_import_member(name, arg_count, depth)
    }

    /// Last local declaration named `name` among the statements preceding `child`.
    fn declared_before(
        &self,
        statements: impl Iterator<Item = NodeIndex>,
        child: NodeIndex,
        name: &str,
    ) -> Option<SymbolId> {
        let mut found = None;
        for statement in statements {
            if statement == child {
                break;
            }
            if self.arena.kind(statement) == Some(SyntaxKind::VariableDeclaration)
                && self.arena.declaration_name(statement) == Some(name)
            {
                found = self.binder.symbol_of(statement).or(found);
            }
        }
        found
    }

    fn parameter_named(
        &self,
        parameters: impl Iterator<Item = NodeIndex>,
        name: &str,
    ) -> Option<SymbolId> {
        parameters
            .filter(|&param| self.arena.declaration_name(param) == Some(name))
            .find_map(|param| self.binder.symbol_of(param))
    }

    fn loop_variable(&self, clause: NodeIndex, name: &str) -> Option<SymbolId> {
        let node = self.arena.get(clause)?;
        let variable = match node.kind {
            SyntaxKind::ForInClause => self.arena.get_for_in_clause(node)?.variable,
            SyntaxKind::LegacyForClause => self.arena.get_legacy_for_clause(node)?.initializer,
            _ => return None,
        };
        if self.arena.declaration_name(variable) == Some(name) {
            self.binder.symbol_of(variable)
        } else {
            None
        }
    }

    fn script_method(
        &self,
        statements: impl Iterator<Item = NodeIndex>,
        name: &str,
        arg_count: Option<usize>,
    ) -> Option<SymbolId> {
        let candidates: SmallVec<[SymbolId; 4]> = statements
            .filter(|&stmt| self.arena.kind(stmt) == Some(SyntaxKind::MethodDeclaration))
            .filter(|&stmt| self.arena.declaration_name(stmt) == Some(name))
            .filter_map(|stmt| self.binder.symbol_of(stmt))
            .collect();
        self.pick_overload(&candidates, arg_count)
    }

    fn class_scope_member(
        &self,
        class: SymbolId,
        name: &str,
        arg_count: Option<usize>,
        depth: usize,
    ) -> Option<SymbolId> {
        match name {
            "this" => Some(class),
            "super" => self.supertypes_at_depth(class, depth).first().copied(),
            _ => self.find_member(class, name, arg_count, depth),
        }
    }

    fn static_import_member(
        &self,
        name: &str,
        arg_count: Option<usize>,
        depth: usize,
    ) -> Option<SymbolId> {
        let table = self.symbols();
        let file = self
            .arena
            .get(self.binder.root)
            .and_then(|root| self.arena.get_source_file(root))?;

        for import in file.imports.iter() {
            let Some(data) = self.arena.get(import).and_then(|n| self.arena.get_import(n)) else {
                continue;
            };
            if !data.is_static {
                continue;
            }
            let found = if data.on_demand {
                table
                    .class(&data.path)
                    .and_then(|class| self.find_member(class, name, arg_count, depth + 1))
            } else {
                let Some((class_path, member)) = data.path.rsplit_once('.') else {
                    continue;
                };
                let visible = data.alias.as_deref().unwrap_or(member);
                if visible != name {
                    continue;
                }
                table
                    .class(class_path)
                    .and_then(|class| self.find_member(class, member, arg_count, depth + 1))
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Resolve a simple type (or top-level package) name as seen from `site`.
    pub fn lookup_type(&self, site: NodeIndex, name: &str) -> Option<SymbolId> {
        let table = self.symbols();
        let arena = self.arena;

        for ancestor in arena.ancestors(site) {
            if arena.kind(ancestor) != Some(SyntaxKind::TypeDeclaration) {
                continue;
            }
            let Some(class) = self.binder.symbol_of(ancestor) else {
                continue;
            };
            if table.get(class).is_some_and(|symbol| symbol.name == name) {
                return Some(class);
            }
            if let Some(nested) = self.nested_class(class, name) {
                return Some(nested);
            }
        }

        let file = arena
            .get(self.binder.root)
            .and_then(|root| arena.get_source_file(root));

        if let Some(file) = file {
            let local = file
                .statements
                .iter()
                .filter(|&stmt| arena.kind(stmt) == Some(SyntaxKind::TypeDeclaration))
                .filter(|&stmt| arena.declaration_name(stmt) == Some(name))
                .find_map(|stmt| self.binder.symbol_of(stmt));
            if local.is_some() {
                return local;
            }

            for import in file.imports.iter() {
                let Some(data) = arena.get(import).and_then(|n| arena.get_import(n)) else {
                    continue;
                };
                if data.on_demand || data.is_static {
                    continue;
                }
                let last = data.path.rsplit('.').next().unwrap_or(&data.path);
                if data.alias.as_deref().unwrap_or(last) == name
                    && let Some(class) = table.class(&data.path)
                {
                    return Some(class);
                }
            }
        }

        let same_package = if self.binder.file_package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.binder.file_package, name)
        };
        if let Some(class) = table.class(&same_package) {
            return Some(class);
        }

        if let Some(file) = file {
            for import in file.imports.iter() {
                let Some(data) = arena.get(import).and_then(|n| arena.get_import(n)) else {
                    continue;
                };
                if data.on_demand
                    && let Some(class) = table.class(&format!("{}.{}", data.path, name))
                {
                    return Some(class);
                }
            }
        }

        for default in &self.default_imports {
            let found = match default.strip_suffix(".*") {
                Some(prefix) => table.class(&format!("{prefix}.{name}")),
                None if default.rsplit('.').next() == Some(name) => table.class(default),
                None => None,
            };
            if found.is_some() {
                return found;
            }
        }

        table.package(name)
    }

    /// Class declared directly inside `class`.
    fn nested_class(&self, class: SymbolId, name: &str) -> Option<SymbolId> {
        let table = self.symbols();
        table
            .members_named(class, name)
            .iter()
            .copied()
            .find(|&id| table.get(id).is_some_and(|s| s.is_class()))
    }

    /// Find a member of `class` or its supertypes.
    ///
    /// `arg_count` is `Some` when the reference is the callee of a call; overloaded
    /// methods are then chosen by arity. Property-style access falls back to a
    /// `getX()` / `isX()` accessor when no field matches.
    pub fn find_member(
        &self,
        class: SymbolId,
        name: &str,
        arg_count: Option<usize>,
        depth: usize,
    ) -> Option<SymbolId> {
        if depth > MAX_QUALIFIER_DEPTH {
            return None;
        }
        let (fields, methods) = self.collect_members(class, name, depth);

        if let Some(count) = arg_count {
            if let Some(method) = self.pick_overload(&methods, Some(count)) {
                return Some(method);
            }
            return fields.first().copied();
        }

        if let Some(&field) = fields.first() {
            return Some(field);
        }
        if let Some(accessor) = self.property_accessor(class, name, depth) {
            return Some(accessor);
        }
        methods.first().copied()
    }

    fn collect_members(
        &self,
        class: SymbolId,
        name: &str,
        depth: usize,
    ) -> (SmallVec<[SymbolId; 4]>, SmallVec<[SymbolId; 4]>) {
        let table = self.symbols();
        let mut fields: SmallVec<[SymbolId; 4]> = SmallVec::new();
        let mut methods: SmallVec<[SymbolId; 4]> = SmallVec::new();
        let mut visited = FxHashSet::default();
        let mut queue: SmallVec<[SymbolId; 8]> = SmallVec::new();
        queue.push(class);
        let mut cursor = 0;

        while cursor < queue.len() && cursor < MAX_HIERARCHY_WALK {
            let current = queue[cursor];
            cursor += 1;
            if !visited.insert(current) {
                continue;
            }
            for &member in table.members_named(current, name) {
                match table.get(member).map(|symbol| symbol.kind) {
                    Some(SymbolKind::Method) => methods.push(member),
                    Some(SymbolKind::Field | SymbolKind::Class) => fields.push(member),
                    _ => {}
                }
            }
            queue.extend(self.supertypes_at_depth(current, depth + 1));
        }
        (fields, methods)
    }

    fn property_accessor(&self, class: SymbolId, name: &str, depth: usize) -> Option<SymbolId> {
        let mut chars = name.chars();
        let first = chars.next()?;
        let capitalized: String = first.to_uppercase().chain(chars).collect();
        ["get", "is"].iter().find_map(|prefix| {
            let (_, methods) = self.collect_members(class, &format!("{prefix}{capitalized}"), depth);
            methods.iter().copied().find(|&method| {
                self.symbols()
                    .get(method)
                    .and_then(|symbol| symbol.arity)
                    .is_some_and(|arity| arity.accepts(0))
            })
        })
    }

    /// First candidate whose arity accepts the call, else the first candidate.
    fn pick_overload(&self, candidates: &[SymbolId], arg_count: Option<usize>) -> Option<SymbolId> {
        let table = self.symbols();
        if let Some(count) = arg_count {
            let by_arity = candidates.iter().copied().find(|&id| {
                table
                    .get(id)
                    .and_then(|symbol| symbol.arity)
                    .is_some_and(|arity| arity.accepts(count))
            });
            if by_arity.is_some() {
                return by_arity;
            }
        }
        candidates.first().copied()
    }

    /// Number of arguments when `reference` is the callee of a call expression.
    pub fn call_argument_count(&self, reference: NodeIndex) -> Option<usize> {
        let parent = self.arena.get(self.arena.parent(reference))?;
        let call = self.arena.get_call(parent)?;
        if call.callee != reference {
            return None;
        }
        Some(
            self.arena
                .get(call.arguments)
                .and_then(|args| self.arena.get_argument_list(args))
                .map_or(0, |args| args.arguments.len()),
        )
    }

    /// Direct supertypes of a class: declared library supertypes, resolved
    /// `extends`/`implements` clauses, and `java.lang.Object` when nothing else applies.
    pub fn supertypes_of(&self, class: SymbolId) -> SmallVec<[SymbolId; 4]> {
        self.supertypes_at_depth(class, 0)
    }

    fn supertypes_at_depth(&self, class: SymbolId, depth: usize) -> SmallVec<[SymbolId; 4]> {
        let mut result: SmallVec<[SymbolId; 4]> = SmallVec::new();
        let table = self.symbols();
        let Some(symbol) = table.get(class) else {
            return result;
        };
        if depth > MAX_QUALIFIER_DEPTH {
            return result;
        }

        result.extend(symbol.supertypes.iter().filter_map(|name| table.class(name)));

        if let Some(decl) = self
            .arena
            .get(symbol.declaration)
            .and_then(|node| self.arena.get_type_decl(node))
        {
            for clause in decl.extends.iter().chain(decl.implements.iter()) {
                if let Some(parent) = self.lookup(clause, &NoReceiverTypes, depth + 1)
                    && parent != class
                    && table.get(parent).is_some_and(|s| s.is_class())
                {
                    result.push(parent);
                }
            }
        }

        if result.is_empty()
            && let Some(object) = table.class("java.lang.Object")
            && object != class
        {
            result.push(object);
        }
        result
    }

    /// Whether `class` is `ancestor` or inherits from it.
    pub fn is_subclass(&self, class: SymbolId, ancestor: SymbolId) -> bool {
        let mut visited = FxHashSet::default();
        let mut queue: SmallVec<[SymbolId; 8]> = SmallVec::new();
        queue.push(class);
        let mut cursor = 0;
        while cursor < queue.len() && cursor < MAX_HIERARCHY_WALK {
            let current = queue[cursor];
            cursor += 1;
            if current == ancestor {
                return true;
            }
            if visited.insert(current) {
                queue.extend(self.supertypes_of(current));
            }
        }
        false
    }

    /// Classes enclosing `site`, innermost first.
    pub fn enclosing_classes(&self, site: NodeIndex) -> SmallVec<[SymbolId; 4]> {
        self.arena
            .ancestors(site)
            .filter(|&idx| self.arena.kind(idx) == Some(SyntaxKind::TypeDeclaration))
            .filter_map(|idx| self.binder.symbol_of(idx))
            .collect()
    }

    /// Whether `symbol` may be used from `site` under private / protected /
    /// package-private rules.
    pub fn is_accessible(&self, symbol: SymbolId, site: NodeIndex) -> bool {
        let table = self.symbols();
        let Some(target) = table.get(symbol) else {
            return true;
        };
        if matches!(
            target.kind,
            SymbolKind::Package | SymbolKind::Variable | SymbolKind::Parameter
        ) {
            return true;
        }

        let flags = target.flags;
        if flags.contains(SymbolFlags::PRIVATE) {
            let declared_in = table.outermost_class(symbol);
            let used_in = self.enclosing_classes(site).last().copied();
            return declared_in.is_some() && declared_in == used_in;
        }

        let same_package = table.package_name_of(symbol) == self.binder.file_package;
        if flags.contains(SymbolFlags::PROTECTED) {
            if same_package {
                return true;
            }
            let Some(owner) = target.owner.filter(|&owner| {
                table.get(owner).is_some_and(|s| s.is_class())
            }) else {
                return false;
            };
            return self
                .enclosing_classes(site)
                .iter()
                .any(|&class| self.is_subclass(class, owner));
        }
        if flags.contains(SymbolFlags::PACKAGE_PRIVATE) {
            return same_package;
        }
        true
    }
}
