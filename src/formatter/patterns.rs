//! Placeholder patterns, compiled once.
//!
//! Every placeholder is wrapped in `!{` … `}!`. Argument-free tags are
//! matched literally; the rest use these regexes.

use regex::Regex;
use std::sync::LazyLock;

pub const OPEN: &str = "!{";
pub const CLOSE: &str = "}!";
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';
/// Delimiters as they appear in inserted message text: split by U+200B so
/// no pattern matches them, while terminals render them unchanged.
pub const ESCAPED_OPEN: &str = "!\u{200B}{";
pub const ESCAPED_CLOSE: &str = "}\u{200B}!";

pub const LEVEL_TAG: &str = "!{level}!";
pub const MESSAGE_TAG: &str = "!{message}!";
pub const HOSTNAME_TAG: &str = "!{hostname}!";
pub const USERNAME_TAG: &str = "!{username}!";

/// `!{date:FORMAT}!`
pub static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\{date:([^{}]+)\}!").expect("DATE regex pattern is valid")
});

/// `!{style:NAME}!` (also accepts `styles:`)
pub static STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\{styles?:([A-Za-z0-9_-]+)\}!").expect("STYLE regex pattern is valid")
});

/// `!{hex:fg:HEX}!` / `!{hex:bg:HEX}!`. The color itself is validated on use.
pub static HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\{hex:([fb])g:([^{}]*)\}!").expect("HEX regex pattern is valid")
});

/// `!{env:NAME}!`
pub static ENV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\{env:([A-Za-z_][A-Za-z0-9_]*)\}!").expect("ENV regex pattern is valid")
});

/// `!{code:LANGUAGE:CODE}!`. Code may span lines and ends at the first `}!`.
pub static CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)!\{code:([A-Za-z0-9+.#_-]+):(.+?)\}!").expect("CODE regex pattern is valid")
});

/// `!{ram:free|used|total:percent|bytes}!`
pub static RAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\{ram:(free|used|total):(percent|bytes)\}!").expect("RAM regex pattern is valid")
});

/// `!{cpu:name|cores|speed}!`
pub static CPU: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\{cpu:(name|cores|speed)\}!").expect("CPU regex pattern is valid")
});

/// `!{uptime:FORMAT}!`
pub static UPTIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\{uptime:([^{}]+)\}!").expect("UPTIME regex pattern is valid")
});

/// Any placeholder, known or not, up to the first closing `}!`. The body may
/// hold braces and newlines.
pub static ANY_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)!\{.*?\}!").expect("ANY_TEMPLATE regex pattern is valid")
});

/// A lone opening or closing delimiter.
pub static STRAY_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\{|\}!").expect("STRAY_DELIMITER regex pattern is valid")
});

/// CSI and OSC escape sequences, then any stray ESC byte.
pub static ANSI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b")
        .expect("ANSI regex pattern is valid")
});
