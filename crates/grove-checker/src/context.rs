//! Checker context and host collaborator traits.
//!
//! A [`CheckerContext`] bundles everything a rule may consult: the syntax arena, the
//! type interner and inheritance graph, and the host-supplied resolver, type provider,
//! fix provider and message formatter. It is made of shared references only and is
//! cheap to copy.

use crate::fixes::{FixHandle, NoImportFixes};
use crate::messages::DefaultMessageFormatter;
use grove_binder::{BinderState, DEFAULT_IMPORTS, Resolution, ScopeResolver, SymbolId, SymbolKind};
use grove_common::DiagnosticMessage;
use grove_solver::{CallableSignature, CompatChecker, InheritanceGraph, TypeFormatter, TypeId, TypeInterner};
use grove_syntax::{NodeArena, NodeIndex};
use serde::{Deserialize, Serialize};

// =============================================================================
// Configuration
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerOptions {
    /// Implicit imports of every file; entries ending in `.*` are on-demand.
    pub default_imports: Vec<String>,
    /// Run each rule under `catch_unwind` and drop the node's diagnostics on panic.
    pub isolate_rule_panics: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            default_imports: DEFAULT_IMPORTS.iter().map(|s| (*s).to_string()).collect(),
            isolate_rule_panics: true,
        }
    }
}

impl CheckerOptions {
    /// Parse options from a JSON object; missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// A scope resolver over `binder` that sees these options' implicit imports.
    pub fn scope_resolver<'a>(
        &self,
        arena: &'a NodeArena,
        binder: &'a BinderState,
    ) -> ScopeResolver<'a> {
        ScopeResolver::new(arena, binder).with_default_imports(&self.default_imports)
    }
}

static DEFAULT_OPTIONS: std::sync::LazyLock<CheckerOptions> =
    std::sync::LazyLock::new(CheckerOptions::default);

// =============================================================================
// Host traits
// =============================================================================

/// Resolves reference nodes to symbols.
pub trait ReferenceResolver {
    fn resolve_reference(&self, reference: NodeIndex) -> Resolution;

    /// Kind of a symbol returned by `resolve_reference`.
    fn symbol_kind(&self, symbol: SymbolId) -> Option<SymbolKind>;
}

/// Best-effort typing of expressions and declarations. `None` means "unknown".
pub trait TypeProvider {
    fn expression_type(&self, expression: NodeIndex) -> Option<TypeId>;

    /// Declared type of a field, parameter or local variable.
    fn declared_type(&self, declaration: NodeIndex) -> Option<TypeId>;

    fn callable_signature(&self, symbol: SymbolId) -> Option<CallableSignature>;

    /// Argument types of the call whose callee is `reference`; `None` when the
    /// reference is not a callee.
    fn argument_types(&self, reference: NodeIndex) -> Option<Vec<Option<TypeId>>>;

    /// The argument list node of the call whose callee is `reference`.
    fn arguments_element(&self, reference: NodeIndex) -> Option<NodeIndex>;
}

/// Supplies "add import" fixes for an unresolved reference.
pub trait ImportFixProvider {
    fn import_fixes(&self, reference: NodeIndex) -> Vec<FixHandle>;
}

/// Renders a message template with its arguments.
pub trait MessageFormatter {
    fn format(&self, message: &DiagnosticMessage, args: &[&str]) -> String;
}

static NO_IMPORT_FIXES: NoImportFixes = NoImportFixes;
static DEFAULT_MESSAGES: DefaultMessageFormatter = DefaultMessageFormatter;

// =============================================================================
// CheckerContext
// =============================================================================

#[derive(Clone, Copy)]
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub types: &'a TypeInterner,
    pub inheritance: &'a InheritanceGraph,
    pub resolver: &'a dyn ReferenceResolver,
    pub type_provider: &'a dyn TypeProvider,
    pub import_fixes: &'a dyn ImportFixProvider,
    pub formatter: &'a dyn MessageFormatter,
    pub options: &'a CheckerOptions,
}

impl<'a> CheckerContext<'a> {
    /// A context with no import fixes, the built-in message table and default options.
    pub fn new(
        arena: &'a NodeArena,
        types: &'a TypeInterner,
        inheritance: &'a InheritanceGraph,
        resolver: &'a dyn ReferenceResolver,
        type_provider: &'a dyn TypeProvider,
    ) -> Self {
        CheckerContext {
            arena,
            types,
            inheritance,
            resolver,
            type_provider,
            import_fixes: &NO_IMPORT_FIXES,
            formatter: &DEFAULT_MESSAGES,
            options: &DEFAULT_OPTIONS,
        }
    }

    #[must_use]
    pub fn with_import_fixes(mut self, import_fixes: &'a dyn ImportFixProvider) -> Self {
        self.import_fixes = import_fixes;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: &'a dyn MessageFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: &'a CheckerOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn compat(&self) -> CompatChecker<'a> {
        CompatChecker::new(self.types, self.inheritance)
    }

    #[inline]
    pub fn type_formatter(&self) -> TypeFormatter<'a> {
        TypeFormatter::new(self.types)
    }
}
