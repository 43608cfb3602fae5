//! Default values for configuration.
//!
//! Functions here double as `#[serde(default = "crate::defaults::...")]`
//! targets on configuration fields.

mod styles;
mod templates;

pub use styles::{RESET, styles};
pub use templates::{level_format, log_format, path_format};

pub fn stringify_indent() -> usize {
    2
}

pub fn bool_true() -> bool {
    true
}
