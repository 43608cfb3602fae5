/// SGR reset.
pub const RESET: &str = "\x1b[0m";

/// Built-in style table.
pub fn styles() -> &'static [(&'static str, &'static str)] {
    &[
        ("reset", RESET),
        ("bold", "\x1b[1m"),
        ("dim", "\x1b[2m"),
        ("italic", "\x1b[3m"),
        ("underline", "\x1b[4m"),
        ("blink", "\x1b[5m"),
        ("inverse", "\x1b[7m"),
        ("hidden", "\x1b[8m"),
        ("strikethrough", "\x1b[9m"),
    ]
}
