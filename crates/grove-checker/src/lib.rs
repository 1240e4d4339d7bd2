//! Node-level semantic diagnostics.
//!
//! The checker is organized into several submodules:
//! - `context` - `CheckerContext`, `CheckerOptions` and the host collaborator traits
//! - `dispatch` - closed node classification and the `Annotator` entry point
//! - `assignment_checker` - simple `=` assignability
//! - `declarations` - variable initializers and nested type declarations
//! - `reference_checker` - value and type/package references
//! - `call_checker` - argument applicability for resolved methods
//! - `statements` - legacy `for` clauses
//! - `expr` - `ExpressionTyper`, the default resolver and type provider
//! - `error_reporter` - diagnostic emission helpers
//! - `error_handler` - `RuleFault`
//! - `sink` - `DiagnosticSink` and `DiagnosticCollector`
//! - `fixes` - import fix handles and the default fix provider
//! - `messages` - message rendering with host overrides
//! - `resolver_adapter` - tagged resolution from raw host lookups
//! - `hierarchy` - inheritance graph population from the symbol table

pub mod assignment_checker;
pub mod call_checker;
pub mod context;
pub mod declarations;
pub mod dispatch;
pub mod error_handler;
mod error_reporter;
pub mod expr;
pub mod fixes;
pub mod hierarchy;
pub mod messages;
pub mod reference_checker;
pub mod resolver_adapter;
pub mod sink;
pub mod state;
pub mod statements;

pub use context::{
    CheckerContext, CheckerOptions, ImportFixProvider, MessageFormatter, ReferenceResolver,
    TypeProvider,
};
pub use dispatch::{Annotator, NodeKind};
pub use error_handler::RuleFault;
pub use expr::ExpressionTyper;
pub use fixes::{FixHandle, NoImportFixes, OuterImportsFixProvider};
pub use hierarchy::register_class_hierarchy;
pub use messages::{BundleFormatter, DefaultMessageFormatter};
pub use resolver_adapter::{RawReferenceResolver, ResolverAdapter};
pub use sink::{Anchor, Diagnostic, DiagnosticCollector, DiagnosticSink, RenderedMessage};
pub use state::CheckerState;
