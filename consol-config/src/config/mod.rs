//! Logger options and the typed patches that mutate them.

mod patch;

pub use patch::{FormatsPatch, LevelFormatsPatch, OptionsPatch, StringifyPatch, StylesPatch};

use serde::{Deserialize, Serialize};

use crate::types::{
    ColorCapability, Formats, LevelFilter, LevelFormats, StringifyOptions, Styles,
};

/// Every setting the logger reads while gating and formatting.
///
/// Level specs are stored here but rendered by the `consol` crate, which
/// owns the invariant that `rendered` tracks `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Master switch; when false nothing is emitted or queued
    #[serde(default = "crate::defaults::bool_true")]
    pub enabled: bool,

    /// When true, admitted log calls are queued until resumed
    #[serde(default)]
    pub paused: bool,

    /// Minimum severity that is emitted
    #[serde(default)]
    pub level: LevelFilter,

    /// Append the plain rendering of each line to the path template's file
    #[serde(default)]
    pub output_to_file: bool,

    /// Terminate the process after a fatal line is emitted
    #[serde(default = "crate::defaults::bool_true")]
    pub exit_on_fatal: bool,

    /// Color depth used when rendering hex colors
    #[serde(default)]
    pub capability: ColorCapability,

    #[serde(default)]
    pub formats: Formats,

    #[serde(default)]
    pub level_formats: LevelFormats,

    #[serde(default)]
    pub styles: Styles,

    #[serde(default)]
    pub stringify: StringifyOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enabled: true,
            paused: false,
            level: LevelFilter::default(),
            output_to_file: false,
            exit_on_fatal: true,
            capability: ColorCapability::default(),
            formats: Formats::default(),
            level_formats: LevelFormats::default(),
            styles: Styles::default(),
            stringify: StringifyOptions::default(),
        }
    }
}
