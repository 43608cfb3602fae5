//! Typed partial updates for [`Options`].
//!
//! Each aggregate has its own patch type and an explicit `merge_into`.
//! Fields left as `None` keep their current value; map-valued patches are
//! merged key by key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Options;
use crate::types::{
    ColorCapability, Formats, LevelFilter, LevelFormats, LogLevel, StringifyOptions, Styles,
};

/// Partial update for the log line and path templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatsPatch {
    pub log: Option<String>,
    pub path: Option<String>,
}

impl FormatsPatch {
    pub fn merge_into(&self, target: &mut Formats) {
        if let Some(log) = &self.log {
            target.log.clone_from(log);
        }
        if let Some(path) = &self.path {
            target.path.clone_from(path);
        }
    }
}

/// Partial update for level templates (raw form only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelFormatsPatch {
    pub log: Option<String>,
    pub info: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub fatal: Option<String>,
    pub debug: Option<String>,
}

impl LevelFormatsPatch {
    pub fn get(&self, level: LogLevel) -> Option<&str> {
        match level {
            LogLevel::Log => self.log.as_deref(),
            LogLevel::Info => self.info.as_deref(),
            LogLevel::Success => self.success.as_deref(),
            LogLevel::Warning => self.warning.as_deref(),
            LogLevel::Error => self.error.as_deref(),
            LogLevel::Fatal => self.fatal.as_deref(),
            LogLevel::Debug => self.debug.as_deref(),
        }
    }

    pub fn set(&mut self, level: LogLevel, template: impl Into<String>) {
        let slot = match level {
            LogLevel::Log => &mut self.log,
            LogLevel::Info => &mut self.info,
            LogLevel::Success => &mut self.success,
            LogLevel::Warning => &mut self.warning,
            LogLevel::Error => &mut self.error,
            LogLevel::Fatal => &mut self.fatal,
            LogLevel::Debug => &mut self.debug,
        };
        *slot = Some(template.into());
    }

    /// Levels this patch touches, with their new templates.
    pub fn entries(&self) -> impl Iterator<Item = (LogLevel, &str)> {
        LogLevel::all()
            .iter()
            .filter_map(move |level| self.get(*level).map(|t| (*level, t)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Replace the raw template of every touched level.
    ///
    /// The rendered form is cleared; the caller must re-render it.
    pub fn merge_into(&self, target: &mut LevelFormats) {
        for (level, template) in self.entries() {
            let spec = target.get_mut(level);
            spec.raw = template.to_string();
            spec.rendered.clear();
        }
    }
}

/// Partial update for the style table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StylesPatch(pub BTreeMap<String, String>);

impl StylesPatch {
    pub fn with(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.0.insert(name.into(), code.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn merge_into(&self, target: &mut Styles) {
        for (name, code) in &self.0 {
            target.insert(name.clone(), code.clone());
        }
    }
}

/// Partial update for stringify options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringifyPatch {
    pub indent: Option<usize>,
    pub themes: BTreeMap<String, String>,
}

impl StringifyPatch {
    pub fn merge_into(&self, target: &mut StringifyOptions) {
        if let Some(indent) = self.indent {
            target.indent = indent;
        }
        for (language, theme) in &self.themes {
            target.themes.insert(language.clone(), theme.clone());
        }
    }
}

/// Partial update for the whole [`Options`] aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    pub enabled: Option<bool>,
    pub paused: Option<bool>,
    pub level: Option<LevelFilter>,
    pub output_to_file: Option<bool>,
    pub exit_on_fatal: Option<bool>,
    pub capability: Option<ColorCapability>,
    pub formats: FormatsPatch,
    pub level_formats: LevelFormatsPatch,
    pub styles: StylesPatch,
    pub stringify: StringifyPatch,
}

impl OptionsPatch {
    /// Whether applying this patch can change any rendered level spec.
    pub fn affects_rendering(&self) -> bool {
        self.capability.is_some()
            || !self.styles.is_empty()
            || !self.level_formats.is_empty()
            || !self.stringify.themes.is_empty()
    }

    pub fn merge_into(&self, target: &mut Options) {
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(paused) = self.paused {
            target.paused = paused;
        }
        if let Some(level) = self.level {
            target.level = level;
        }
        if let Some(output_to_file) = self.output_to_file {
            target.output_to_file = output_to_file;
        }
        if let Some(exit_on_fatal) = self.exit_on_fatal {
            target.exit_on_fatal = exit_on_fatal;
        }
        if let Some(capability) = self.capability {
            target.capability = capability;
        }
        self.formats.merge_into(&mut target.formats);
        self.level_formats.merge_into(&mut target.level_formats);
        self.styles.merge_into(&mut target.styles);
        self.stringify.merge_into(&mut target.stringify);
        log::debug!("Merged options patch (affects rendering: {})", self.affects_rendering());
    }
}
