//! Diagnostic categories, message keys and the message table.
//!
//! Every diagnostic the annotator produces is identified by a message key
//! (`"cannot.resolve"`) and a numeric code. Templates carry `{0}`, `{1}`, ...
//! placeholders; hosts with their own localized bundles look messages up by key
//! and only need the argument order documented next to each template.

use serde::{Deserialize, Serialize};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
}

/// How the host should paint the anchor range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightKind {
    /// Severity-driven default highlighting.
    #[default]
    Generic,
    /// Highlight as a reference to a symbol that does not exist.
    UnknownSymbol,
}

/// A diagnostic message definition with code, key, default category and template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub key: &'static str,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const CANNOT_ASSIGN: u32 = 3001;
    pub const CANNOT_ACCESS: u32 = 3002;
    pub const CANNOT_RESOLVE: u32 = 3003;
    pub const CANNOT_APPLY_METHOD: u32 = 3004;
    pub const INNER_CLASSES_NOT_SUPPORTED: u32 = 3005;
    pub const LEGACY_FOR_NOT_IMPLEMENTED: u32 = 3006;
}

pub mod diagnostic_keys {
    pub const CANNOT_ASSIGN: &str = "cannot.assign";
    pub const CANNOT_ACCESS: &str = "cannot.access";
    pub const CANNOT_RESOLVE: &str = "cannot.resolve";
    pub const CANNOT_APPLY_METHOD: &str = "cannot.apply.method";
    pub const INNER_CLASSES_NOT_SUPPORTED: &str = "inner.classes.not.supported";
    pub const LEGACY_FOR_NOT_IMPLEMENTED: &str = "legacy.for.not.implemented";
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_keys};

    /// `{0}`: source type, `{1}`: target type.
    pub const CANNOT_ASSIGN: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CANNOT_ASSIGN,
        key: diagnostic_keys::CANNOT_ASSIGN,
        category: DiagnosticCategory::Warning,
        message: "Cannot assign '{0}' to '{1}'",
    };

    /// `{0}`: referenced name.
    pub const CANNOT_ACCESS: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CANNOT_ACCESS,
        key: diagnostic_keys::CANNOT_ACCESS,
        category: DiagnosticCategory::Warning,
        message: "Cannot access '{0}'",
    };

    /// `{0}`: referenced name.
    pub const CANNOT_RESOLVE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CANNOT_RESOLVE,
        key: diagnostic_keys::CANNOT_RESOLVE,
        category: DiagnosticCategory::Error,
        message: "Cannot resolve symbol '{0}'",
    };

    /// `{0}`: method name.
    pub const CANNOT_APPLY_METHOD: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CANNOT_APPLY_METHOD,
        key: diagnostic_keys::CANNOT_APPLY_METHOD,
        category: DiagnosticCategory::Warning,
        message: "Method '{0}' cannot be applied to the given arguments",
    };

    pub const INNER_CLASSES_NOT_SUPPORTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INNER_CLASSES_NOT_SUPPORTED,
        key: diagnostic_keys::INNER_CLASSES_NOT_SUPPORTED,
        category: DiagnosticCategory::Error,
        message: "Inner classes are not supported",
    };

    pub const LEGACY_FOR_NOT_IMPLEMENTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::LEGACY_FOR_NOT_IMPLEMENTED,
        key: diagnostic_keys::LEGACY_FOR_NOT_IMPLEMENTED,
        category: DiagnosticCategory::Error,
        message: "\"Traditional\" for-loop clause is not implemented in the language yet",
    };
}

pub use diagnostic_keys as keys;

/// All known messages, in code order.
pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::CANNOT_ASSIGN,
    diagnostic_messages::CANNOT_ACCESS,
    diagnostic_messages::CANNOT_RESOLVE,
    diagnostic_messages::CANNOT_APPLY_METHOD,
    diagnostic_messages::INNER_CLASSES_NOT_SUPPORTED,
    diagnostic_messages::LEGACY_FOR_NOT_IMPLEMENTED,
];

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Look up a diagnostic message definition by key.
#[must_use]
pub fn get_diagnostic_message_by_key(key: &str) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.key == key)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}
