//! Configuration types and enums.
//!
//! - `color`     - Terminal color capability tiers
//! - `format`    - Format templates, per-level format specs, hook timing
//! - `level`     - Log levels and the threshold filter
//! - `style`     - Named style escape codes
//! - `stringify` - Argument stringification options

pub mod color;
pub mod format;
pub mod level;
pub mod style;
pub mod stringify;

pub use color::ColorCapability;
pub use format::{FormatKind, FormatSpec, Formats, LevelFormats, RunAt};
pub use level::{LevelFilter, LogLevel};
pub use style::Styles;
pub use stringify::StringifyOptions;
