//! Format templates and per-level format specs.

use serde::{Deserialize, Serialize};

use super::level::LogLevel;

/// Which top-level template a setter addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// The log line template
    Log,
    /// The log file path template
    Path,
}

/// When a user format hook runs relative to the built-in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunAt {
    /// Before any placeholder is resolved
    Before,
    /// After every placeholder is resolved
    After,
}

/// A user-authored level template and its pre-rendered terminal form.
///
/// `rendered` is derived from `raw` at configuration time and is never
/// touched by per-message formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatSpec {
    /// Template as written, may contain placeholders
    pub raw: String,
    /// Terminal form with color and style placeholders resolved
    #[serde(skip)]
    pub rendered: String,
}

impl FormatSpec {
    /// Create a spec whose rendered form has not been computed yet.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            rendered: String::new(),
        }
    }
}

/// The log line and file path templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formats {
    /// Log line template
    #[serde(default = "crate::defaults::log_format")]
    pub log: String,
    /// Log file path template, resolved once per write
    #[serde(default = "crate::defaults::path_format")]
    pub path: String,
}

impl Formats {
    pub fn get(&self, kind: FormatKind) -> &str {
        match kind {
            FormatKind::Log => &self.log,
            FormatKind::Path => &self.path,
        }
    }

    pub fn set(&mut self, kind: FormatKind, template: impl Into<String>) {
        match kind {
            FormatKind::Log => self.log = template.into(),
            FormatKind::Path => self.path = template.into(),
        }
    }
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            log: crate::defaults::log_format(),
            path: crate::defaults::path_format(),
        }
    }
}

/// One [`FormatSpec`] for every [`LogLevel`].
///
/// Holding a field per level means no level can ever be missing a spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelFormats {
    pub log: FormatSpec,
    pub info: FormatSpec,
    pub success: FormatSpec,
    pub warning: FormatSpec,
    pub error: FormatSpec,
    pub fatal: FormatSpec,
    pub debug: FormatSpec,
}

impl LevelFormats {
    pub fn get(&self, level: LogLevel) -> &FormatSpec {
        match level {
            LogLevel::Log => &self.log,
            LogLevel::Info => &self.info,
            LogLevel::Success => &self.success,
            LogLevel::Warning => &self.warning,
            LogLevel::Error => &self.error,
            LogLevel::Fatal => &self.fatal,
            LogLevel::Debug => &self.debug,
        }
    }

    pub fn get_mut(&mut self, level: LogLevel) -> &mut FormatSpec {
        match level {
            LogLevel::Log => &mut self.log,
            LogLevel::Info => &mut self.info,
            LogLevel::Success => &mut self.success,
            LogLevel::Warning => &mut self.warning,
            LogLevel::Error => &mut self.error,
            LogLevel::Fatal => &mut self.fatal,
            LogLevel::Debug => &mut self.debug,
        }
    }

    /// Iterate over every level and its spec in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (LogLevel, &FormatSpec)> {
        LogLevel::all().iter().map(move |level| (*level, self.get(*level)))
    }
}

impl Default for LevelFormats {
    fn default() -> Self {
        Self {
            log: FormatSpec::new(crate::defaults::level_format(LogLevel::Log)),
            info: FormatSpec::new(crate::defaults::level_format(LogLevel::Info)),
            success: FormatSpec::new(crate::defaults::level_format(LogLevel::Success)),
            warning: FormatSpec::new(crate::defaults::level_format(LogLevel::Warning)),
            error: FormatSpec::new(crate::defaults::level_format(LogLevel::Error)),
            fatal: FormatSpec::new(crate::defaults::level_format(LogLevel::Fatal)),
            debug: FormatSpec::new(crate::defaults::level_format(LogLevel::Debug)),
        }
    }
}
