//! Message rendering.
//!
//! [`DefaultMessageFormatter`] renders the built-in templates. [`BundleFormatter`]
//! lets a host replace templates by message key (localized bundles); keys it does not
//! know fall back to the built-in text.

use crate::context::MessageFormatter;
use grove_common::{DiagnosticMessage, format_message};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub struct DefaultMessageFormatter;

impl MessageFormatter for DefaultMessageFormatter {
    fn format(&self, message: &DiagnosticMessage, args: &[&str]) -> String {
        format_message(message.message, args)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleFormatter {
    templates: IndexMap<String, String>,
}

impl BundleFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a flat `{ "message.key": "template {0}" }` JSON object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn with_template(mut self, key: &str, template: &str) -> Self {
        self.templates.insert(key.to_string(), template.to_string());
        self
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }
}

impl MessageFormatter for BundleFormatter {
    fn format(&self, message: &DiagnosticMessage, args: &[&str]) -> String {
        let template = self.template(message.key).unwrap_or(message.message);
        format_message(template, args)
    }
}

#[cfg(test)]
#[path = "../tests/messages_tests.rs"]
mod tests;
