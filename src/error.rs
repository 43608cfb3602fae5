//! Typed errors for the consol logger.
//!
//! Configuration-time problems (bad color, duplicate hook id) and file I/O
//! failures are surfaced to the caller. Per-message anomalies such as an
//! unknown placeholder or a failing highlighter are not errors: they are
//! left in place or degraded silently, so no variant exists for them.

use std::path::PathBuf;

/// Errors returned by configuration setters and log calls.
#[derive(Debug, thiserror::Error)]
pub enum ConsolError {
    /// A hex color was not 3 or 6 hex digits after normalization.
    #[error("invalid hex color: {0:?}")]
    InvalidColor(String),

    /// Creating the log directory or appending to the log file failed.
    #[error("I/O error writing log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A format hook with this id is already registered.
    #[error("format function with id {0:?} already exists")]
    DuplicateRegistration(String),

    /// No format hook with this id is registered.
    #[error("format function with id {0:?} does not exist")]
    MissingRegistration(String),
}

pub type Result<T> = std::result::Result<T, ConsolError>;
