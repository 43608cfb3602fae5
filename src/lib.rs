//! Template-based console and file logger.
//!
//! A log line is described by a format template containing `!{tag:args}!`
//! placeholders. Every call is rendered twice from the same template: once
//! with ANSI colors for the terminal and once as plain text appended to a
//! dated log file. Colors are given as hex and degraded to what the terminal
//! supports.
//!
//! ```no_run
//! use consol::{Consol, LogLevel};
//!
//! let mut consol = Consol::new();
//! consol.set_level(LogLevel::Info);
//! consol.set_log_format("!{date:%H:%M:%S}! !{level}! !{message}!");
//! consol.info(["listening on", "0.0.0.0:8080"])?;
//! # Ok::<(), consol::ConsolError>(())
//! ```
//!
//! # Mutex Usage
//!
//! `Consol` is `Send` and holds no locks itself. Share one instance across
//! threads behind a `parking_lot::Mutex`, or use [`global()`].

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod color;
pub mod error;
pub mod formatter;
pub mod global;
pub mod logger;
pub mod options;

pub use consol_config::{
    ColorCapability, FormatKind, FormatSpec, FormatsPatch, LevelFilter, LevelFormatsPatch,
    LogLevel, Options, OptionsPatch, RunAt, StringifyOptions, StringifyPatch, StylesPatch,
};
pub use color::{detect_capability, resolve_color};
pub use error::{ConsolError, Result};
pub use formatter::{CpuInfo, Highlighter, HostMetrics, MemoryInfo, NoHighlighter, SystemMetrics};
pub use global::global;
pub use logger::{Consol, FormattedLine, JsonStringify, PendingLogEntry, Stringify};
pub use options::OptionsState;
