//! Log levels and threshold filtering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single log call.
///
/// Variants are declared in the order the logger exposes them. Gating does
/// not use declaration order; it uses [`LogLevel::severity`], where `Debug`
/// is the least severe and `Fatal` the most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Info,
    Success,
    Warning,
    Error,
    Fatal,
    Debug,
}

impl LogLevel {
    /// All levels in declaration order.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Log,
            LogLevel::Info,
            LogLevel::Success,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Fatal,
            LogLevel::Debug,
        ]
    }

    /// Numeric severity rank used for threshold comparison.
    ///
    /// Higher means more severe.
    pub fn severity(self) -> u8 {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Log => 1,
            LogLevel::Info => 2,
            LogLevel::Success => 3,
            LogLevel::Warning => 4,
            LogLevel::Error => 5,
            LogLevel::Fatal => 6,
        }
    }

    /// Lowercase name, as used in configuration keys.
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Log => "log",
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Debug => "debug",
        }
    }

    /// Parse a lowercase or capitalised level name.
    pub fn from_name(name: &str) -> Option<LogLevel> {
        LogLevel::all()
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum severity a log call needs to be emitted.
///
/// `Off` is the sentinel that admits nothing. `At(level)` admits every level
/// whose severity is at or above `level`'s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelFilter {
    Off,
    #[serde(untagged)]
    At(LogLevel),
}

impl LevelFilter {
    /// Whether `level` passes this filter.
    pub fn admits(self, level: LogLevel) -> bool {
        match self {
            LevelFilter::Off => false,
            LevelFilter::At(min) => level.severity() >= min.severity(),
        }
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        LevelFilter::At(LogLevel::Log)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        LevelFilter::At(level)
    }
}
