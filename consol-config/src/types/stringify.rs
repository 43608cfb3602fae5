//! Argument stringification options.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options for turning log arguments into message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringifyOptions {
    /// Indent width for structured values. Zero means compact output.
    pub indent: usize,
    /// Highlight theme name per language, passed to the highlighter
    pub themes: BTreeMap<String, String>,
}

impl StringifyOptions {
    pub fn theme(&self, language: &str) -> Option<&str> {
        self.themes.get(language).map(String::as_str)
    }
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            indent: crate::defaults::stringify_indent(),
            themes: BTreeMap::new(),
        }
    }
}
