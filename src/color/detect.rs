//! Terminal color capability detection from the process environment.

use consol_config::ColorCapability;

/// Detect the color capability of the current terminal.
///
/// Reads `NO_COLOR`, `COLORTERM` and `TERM`. Unknown terminals get the
/// 16-color tier, which every color terminal supports.
pub fn detect_capability() -> ColorCapability {
    capability_from_hints(
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

/// Pure form of [`detect_capability`] over already-read environment values.
pub fn capability_from_hints(
    no_color: bool,
    colorterm: Option<&str>,
    term: Option<&str>,
) -> ColorCapability {
    if no_color {
        return ColorCapability::None;
    }
    if colorterm.is_some_and(|v| contains_ci(v, "truecolor") || contains_ci(v, "24bit")) {
        return ColorCapability::TrueColor;
    }
    if term.is_some_and(|v| contains_ci(v, "truecolor") || contains_ci(v, "24bit")) {
        return ColorCapability::TrueColor;
    }
    if term.is_some_and(|v| contains_ci(v, "256color")) {
        return ColorCapability::Ansi256;
    }
    if colorterm.is_some_and(|v| contains_ci(v, "256")) {
        return ColorCapability::Ansi256;
    }
    if term.is_some_and(|v| v.eq_ignore_ascii_case("dumb")) {
        return ColorCapability::None;
    }
    ColorCapability::Basic
}

fn contains_ci(value: &str, needle: &str) -> bool {
    value.to_ascii_lowercase().contains(needle)
}
