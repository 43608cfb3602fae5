//! Named style escape codes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Map of style name (e.g. `bold`) to the escape code emitted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Styles(BTreeMap<String, String>);

impl Styles {
    /// An empty style table.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Insert or replace a style, returning the previous code if any.
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), code.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The reset code, falling back to SGR 0 if it was removed.
    pub fn reset(&self) -> &str {
        self.get("reset").unwrap_or(crate::defaults::RESET)
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self(
            crate::defaults::styles()
                .iter()
                .map(|(name, code)| ((*name).to_string(), (*code).to_string()))
                .collect(),
        )
    }
}

impl FromIterator<(String, String)> for Styles {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
