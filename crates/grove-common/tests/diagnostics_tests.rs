//! Tests for the message table, message formatting and spans.

use grove_common::diagnostics::{
    DIAGNOSTIC_MESSAGES, get_diagnostic_message, get_diagnostic_message_by_key,
    get_message_template,
};
use grove_common::{DiagnosticCategory, Span, diagnostic_codes, diagnostic_messages, format_message};

#[test]
fn test_format_message_replaces_positional_placeholders() {
    let text = format_message(
        diagnostic_messages::CANNOT_ASSIGN.message,
        &["java.lang.String", "int"],
    );
    assert_eq!(text, "Cannot assign 'java.lang.String' to 'int'");
}

#[test]
fn test_format_message_leaves_missing_arguments_untouched() {
    let text = format_message("Cannot resolve symbol '{0}' in '{1}'", &["Foo"]);
    assert_eq!(text, "Cannot resolve symbol 'Foo' in '{1}'");
}

#[test]
fn test_message_codes_and_keys_are_unique() {
    for (i, a) in DIAGNOSTIC_MESSAGES.iter().enumerate() {
        for b in &DIAGNOSTIC_MESSAGES[i + 1..] {
            assert_ne!(a.code, b.code, "duplicate code {}", a.code);
            assert_ne!(a.key, b.key, "duplicate key {}", a.key);
        }
    }
}

#[test]
fn test_lookup_by_code_and_key_agree() {
    let by_code = get_diagnostic_message(diagnostic_codes::CANNOT_RESOLVE).unwrap();
    let by_key = get_diagnostic_message_by_key("cannot.resolve").unwrap();
    assert_eq!(by_code, by_key);
    assert_eq!(by_code.category, DiagnosticCategory::Error);
    assert_eq!(
        get_message_template(diagnostic_codes::CANNOT_ACCESS),
        Some("Cannot access '{0}'")
    );
    assert!(get_diagnostic_message(9999).is_none());
}

#[test]
fn test_span_cover_and_contains() {
    let a = Span::new(4, 10);
    let b = Span::at(12, 3);
    let covered = a.cover(b);
    assert_eq!(covered, Span::new(4, 15));
    assert!(covered.contains(14));
    assert!(!covered.contains(15));
    assert_eq!(b.len(), 3);
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn test_category_serializes_by_name() {
    let json = serde_json::to_string(&DiagnosticCategory::Warning).unwrap();
    assert_eq!(json, "\"Warning\"");
}
