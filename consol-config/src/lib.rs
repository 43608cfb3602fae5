//! Configuration data for the consol template logger.
//!
//! This crate is pure data. It provides:
//!
//! - Log levels and the threshold filter used for gating
//! - Format templates (log line, file path) and per-level format specs
//! - Named style escape codes and stringify options
//! - Typed patch structs with explicit merge functions
//! - Built-in default templates and styles
//!
//! Rendering of level templates into terminal escape sequences lives in the
//! `consol` crate; this crate only stores the result.

pub mod config;
pub mod defaults;
mod types;

pub use config::{
    FormatsPatch, LevelFormatsPatch, Options, OptionsPatch, StringifyPatch, StylesPatch,
};
pub use types::{
    ColorCapability, FormatKind, FormatSpec, Formats, LevelFilter, LevelFormats, LogLevel, RunAt,
    StringifyOptions, Styles,
};
