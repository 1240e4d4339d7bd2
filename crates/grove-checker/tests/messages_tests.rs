use super::*;
use grove_common::diagnostic_messages;

#[test]
fn test_default_formatter_uses_builtin_templates() {
    let text = DefaultMessageFormatter.format(
        &diagnostic_messages::CANNOT_ASSIGN,
        &["java.lang.String", "int"],
    );
    assert_eq!(text, "Cannot assign 'java.lang.String' to 'int'");

    let text = DefaultMessageFormatter.format(&diagnostic_messages::INNER_CLASSES_NOT_SUPPORTED, &[]);
    assert_eq!(text, "Inner classes are not supported");
}

#[test]
fn test_bundle_overrides_by_key() {
    let bundle = BundleFormatter::new()
        .with_template("cannot.access", "Zugriff auf '{0}' nicht erlaubt");

    assert_eq!(
        bundle.format(&diagnostic_messages::CANNOT_ACCESS, &["secret"]),
        "Zugriff auf 'secret' nicht erlaubt"
    );
    assert_eq!(
        bundle.format(&diagnostic_messages::CANNOT_RESOLVE, &["Foo"]),
        "Cannot resolve symbol 'Foo'"
    );
    assert_eq!(bundle.template("cannot.resolve"), None);
}

#[test]
fn test_bundle_from_json() {
    let bundle = BundleFormatter::from_json(
        r#"{ "cannot.apply.method": "'{0}' rejects these arguments" }"#,
    )
    .unwrap();
    assert_eq!(
        bundle.template("cannot.apply.method"),
        Some("'{0}' rejects these arguments")
    );
    assert_eq!(
        bundle.format(&diagnostic_messages::CANNOT_APPLY_METHOD, &["max"]),
        "'max' rejects these arguments"
    );

    assert!(BundleFormatter::from_json("[1, 2]").is_err());
}
