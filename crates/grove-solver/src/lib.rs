//! Types and type relations for the grove annotator.
//!
//! - `types` - `TypeId`, `TypeData` and the well-known type ids
//! - `intern` - `TypeInterner`
//! - `inheritance` - `InheritanceGraph` over class types
//! - `environment` - `TypeEnvironment`: declared types and signatures of symbols
//! - `compat` - `CompatChecker`, the assignability oracle
//! - `applicability` - `CallableSignature` and argument/parameter matching
//! - `format` - `TypeFormatter` for diagnostic text

pub mod applicability;
pub mod compat;
pub mod environment;
pub mod format;
pub mod inheritance;
pub mod intern;
pub mod types;

pub use applicability::{CallableSignature, ParamInfo, is_applicable};
pub use compat::CompatChecker;
pub use environment::TypeEnvironment;
pub use format::TypeFormatter;
pub use inheritance::InheritanceGraph;
pub use intern::TypeInterner;
pub use types::{ClassType, PrimitiveKind, TypeData, TypeId};
