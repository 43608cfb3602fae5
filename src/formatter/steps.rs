//! Individual pipeline steps.
//!
//! Each step handles a single placeholder grammar. Replacement text is
//! never rescanned by the step that produced it.

use std::fmt::{Display, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use consol_config::RunAt;
use regex::{Captures, Regex};

use super::FormatContext;
use super::patterns::{
    ANSI, CLOSE, CODE, CPU, DATE, ENV, ESCAPED_CLOSE, ESCAPED_OPEN, HEX, HOSTNAME_TAG, LEVEL_TAG,
    MESSAGE_TAG, OPEN, RAM, STYLE, UPTIME, USERNAME_TAG, ZERO_WIDTH_SPACE,
};
use crate::color::resolve_color;
use crate::error::{ConsolError, Result};

/// Replace every match of `re` in `buffer`, returning the buffer itself
/// when nothing matched.
fn replace_all(buffer: String, re: &Regex, replacer: impl FnMut(&Captures) -> String) -> String {
    let replaced = match re.replace_all(&buffer, replacer) {
        std::borrow::Cow::Owned(s) => Some(s),
        std::borrow::Cow::Borrowed(_) => None,
    };
    replaced.unwrap_or(buffer)
}

fn replace_literal(buffer: String, tag: &str, value: impl FnOnce() -> Option<String>) -> String {
    if !buffer.contains(tag) {
        return buffer;
    }
    match value() {
        Some(value) => buffer.replace(tag, &value),
        None => buffer,
    }
}

/// Format `time` with a strftime pattern, or `None` if the pattern is invalid.
fn strftime<Tz: TimeZone>(time: &DateTime<Tz>, pattern: &str) -> Option<String>
where
    Tz::Offset: Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", time.format_with_items(items.iter())).ok()?;
    Some(out)
}

pub fn hooks_before(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(ctx.hooks.apply(RunAt::Before, buffer))
}

pub fn hooks_after(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(ctx.hooks.apply(RunAt::After, buffer))
}

pub fn date(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_all(buffer, &DATE, |caps| {
        strftime(&ctx.now, &caps[1]).unwrap_or_else(|| caps[0].to_string())
    }))
}

/// Insert the message with its delimiters split by a zero-width space, so
/// later steps never read message text as a placeholder.
pub fn message(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    if !buffer.contains(MESSAGE_TAG) {
        return Ok(buffer);
    }
    let escaped = escape_delimiters(ctx.message);
    let mut out = String::with_capacity(buffer.len() + escaped.len());
    for (index, piece) in buffer.split(MESSAGE_TAG).enumerate() {
        if index > 0 {
            if joins_delimiter(&out, &escaped) {
                out.push(ZERO_WIDTH_SPACE);
            }
            out.push_str(&escaped);
        }
        if joins_delimiter(&out, piece) {
            out.push(ZERO_WIDTH_SPACE);
        }
        out.push_str(piece);
    }
    Ok(out)
}

/// Split every `!{` and `}!` in `text`.
pub fn escape_delimiters(text: &str) -> String {
    text.replace(OPEN, ESCAPED_OPEN).replace(CLOSE, ESCAPED_CLOSE)
}

/// Whether appending `right` to `left` would form a delimiter at the seam.
fn joins_delimiter(left: &str, right: &str) -> bool {
    (left.ends_with('!') && right.starts_with('{')) || (left.ends_with('}') && right.starts_with('!'))
}

pub fn env(buffer: String, _ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_all(buffer, &ENV, |caps| {
        std::env::var(&caps[1]).unwrap_or_default()
    }))
}

pub fn ram(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    if !RAM.is_match(&buffer) {
        return Ok(buffer);
    }
    let mem = ctx.metrics.memory();
    Ok(replace_all(buffer, &RAM, |caps| {
        let value = match &caps[1] {
            "free" => mem.free,
            "used" => mem.used(),
            _ => mem.total,
        };
        match &caps[2] {
            "percent" => mem.percent(value),
            _ => value.to_string(),
        }
    }))
}

pub fn cpu(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    if !CPU.is_match(&buffer) {
        return Ok(buffer);
    }
    let cpu = ctx.metrics.cpu();
    if cpu.cores == 0 {
        return Ok(buffer);
    }
    Ok(replace_all(buffer, &CPU, |caps| match &caps[1] {
        "name" => cpu.names.join(", "),
        "cores" => cpu.cores.to_string(),
        _ => cpu.speed_mhz.to_string(),
    }))
}

pub fn hostname(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_literal(buffer, HOSTNAME_TAG, || {
        Some(ctx.metrics.hostname())
    }))
}

pub fn username(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_literal(buffer, USERNAME_TAG, || ctx.metrics.username()))
}

/// Uptime is rendered as a time that many seconds after the Unix epoch, so
/// `%H:%M:%S` reads as hours, minutes and seconds of uptime.
pub fn uptime(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    if !UPTIME.is_match(&buffer) {
        return Ok(buffer);
    }
    let secs = i64::try_from(ctx.metrics.uptime_secs()).unwrap_or(i64::MAX);
    let Some(since_epoch) = DateTime::<Utc>::from_timestamp(secs, 0) else {
        return Ok(buffer);
    };
    Ok(replace_all(buffer, &UPTIME, |caps| {
        strftime(&since_epoch, &caps[1]).unwrap_or_else(|| caps[0].to_string())
    }))
}

/// Insert the level's pre-rendered terminal form, followed by a reset.
pub fn level_rendered(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_literal(buffer, LEVEL_TAG, || {
        let spec = ctx.options.level_formats.get(ctx.level);
        Some(format!("{}{}", spec.rendered, ctx.options.styles.reset()))
    }))
}

/// Insert the level's raw template; later steps strip what it leaves behind.
pub fn level_raw(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_literal(buffer, LEVEL_TAG, || {
        Some(ctx.options.level_formats.get(ctx.level).raw.clone())
    }))
}

pub fn style(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_all(buffer, &STYLE, |caps| {
        ctx.options
            .styles
            .get(&caps[1])
            .map_or_else(|| caps[0].to_string(), str::to_string)
    }))
}

pub fn hex(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    let mut failure: Option<ConsolError> = None;
    let resolved = replace_all(buffer, &HEX, |caps| {
        match resolve_color(&caps[2], &caps[1] == "b", ctx.options.capability) {
            Ok(sequence) => sequence,
            Err(e) => {
                failure.get_or_insert(e);
                String::new()
            }
        }
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(resolved),
    }
}

pub fn code(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_all(buffer, &CODE, |caps| {
        let language = caps[1].trim().to_lowercase();
        let source = &caps[2];
        if !ctx.highlighter.supports(&language) {
            return source.to_string();
        }
        let theme = ctx.options.stringify.theme(&language);
        match ctx.highlighter.highlight(source, &language, theme) {
            Ok(highlighted) => highlighted,
            Err(e) => {
                log::debug!("Highlighting {language} failed, using plain code: {e}");
                source.to_string()
            }
        }
    }))
}

pub fn code_plain(buffer: String, _ctx: &FormatContext<'_>) -> Result<String> {
    Ok(replace_all(buffer, &CODE, |caps| caps[2].to_string()))
}

/// Append a reset unless the buffer already ends with one.
pub fn trailing_reset(buffer: String, ctx: &FormatContext<'_>) -> Result<String> {
    let reset = ctx.options.styles.reset();
    if reset.is_empty() || buffer.ends_with(reset) {
        return Ok(buffer);
    }
    Ok(buffer + reset)
}

pub fn strip(buffer: String, _ctx: &FormatContext<'_>) -> Result<String> {
    if !buffer.contains(OPEN) && !buffer.contains(CLOSE) && !ANSI.is_match(&buffer) {
        return Ok(buffer);
    }
    Ok(super::strip(&buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{CpuInfo, FormatHooks, HostMetrics, MemoryInfo, NoHighlighter};
    use chrono::Local;
    use consol_config::{ColorCapability, LogLevel, Options};

    struct FixedMetrics;

    impl HostMetrics for FixedMetrics {
        fn memory(&self) -> MemoryInfo {
            MemoryInfo {
                total: 2048,
                free: 512,
            }
        }
        fn cpu(&self) -> CpuInfo {
            CpuInfo {
                names: vec!["Test CPU".to_string()],
                cores: 8,
                speed_mhz: 3200,
            }
        }
        fn hostname(&self) -> String {
            "testhost".to_string()
        }
        fn username(&self) -> Option<String> {
            None
        }
        fn uptime_secs(&self) -> u64 {
            3 * 3600 + 25 * 60 + 7
        }
    }

    fn ctx<'a>(options: &'a Options, hooks: &'a FormatHooks, message: &'a str) -> FormatContext<'a> {
        FormatContext {
            level: LogLevel::Info,
            message,
            now: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
            options,
            hooks,
            highlighter: &NoHighlighter,
            metrics: &FixedMetrics,
        }
    }

    #[test]
    fn test_date_formats_and_fails_open() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "");
        assert_eq!(date("!{date:%Y-%m-%d}!".into(), &c).unwrap(), "2024-03-09");
        assert_eq!(date("!{date:%Q}!".into(), &c).unwrap(), "!{date:%Q}!");
    }

    #[test]
    fn test_message_is_inserted_verbatim() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "cost: $5 ${x}");
        assert_eq!(message("> !{message}!".into(), &c).unwrap(), "> cost: $5 ${x}");
    }

    #[test]
    fn test_message_delimiters_are_escaped() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "a!{message}! !{hex:fg:oops}! !{env:HOME}!");
        let once = message("!{message}!".into(), &c).unwrap();
        assert_eq!(
            once,
            "a!\u{200B}{message}\u{200B}! !\u{200B}{hex:fg:oops}\u{200B}! !\u{200B}{env:HOME}\u{200B}!"
        );
        assert_eq!(message(once.clone(), &c).unwrap(), once);
        assert_eq!(hex(once.clone(), &c).unwrap(), once);
        assert_eq!(env(once.clone(), &c).unwrap(), once);
    }

    #[test]
    fn test_message_cannot_join_template_delimiters() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "{hex:fg:oops}");
        let joined = message("!!{message}!!".into(), &c).unwrap();
        assert_eq!(joined, "!\u{200B}{hex:fg:oops}\u{200B}!");
        assert_eq!(hex(joined.clone(), &c).unwrap(), joined);
        assert_eq!(escape_delimiters("plain"), "plain");

        let c = ctx(&options, &hooks, "started!");
        assert_eq!(message("!{message}! ok".into(), &c).unwrap(), "started! ok");
        let c = ctx(&options, &hooks, "");
        assert_eq!(
            message("!!{message}!{x}".into(), &c).unwrap(),
            "!\u{200B}{x}"
        );
    }

    #[test]
    fn test_env_missing_is_empty() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "");
        assert_eq!(
            env("[!{env:CONSOL_SURELY_UNSET_VAR_91}!]".into(), &c).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_system_tags() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "");
        assert_eq!(ram("!{ram:used:percent}!".into(), &c).unwrap(), "75.00");
        assert_eq!(ram("!{ram:total:bytes}!".into(), &c).unwrap(), "2048");
        assert_eq!(cpu("!{cpu:cores}!@!{cpu:speed}!".into(), &c).unwrap(), "8@3200");
        assert_eq!(cpu("!{cpu:name}!".into(), &c).unwrap(), "Test CPU");
        assert_eq!(hostname("!{hostname}!".into(), &c).unwrap(), "testhost");
        assert_eq!(username("!{username}!".into(), &c).unwrap(), "!{username}!");
        assert_eq!(uptime("!{uptime:%H:%M:%S}!".into(), &c).unwrap(), "03:25:07");
    }

    #[test]
    fn test_style_known_and_unknown() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "");
        assert_eq!(style("!{style:bold}!b".into(), &c).unwrap(), "\x1b[1mb");
        assert_eq!(style("!{styles:bold}!b".into(), &c).unwrap(), "\x1b[1mb");
        assert_eq!(style("!{style:sparkle}!".into(), &c).unwrap(), "!{style:sparkle}!");
    }

    #[test]
    fn test_hex_invalid_color_is_an_error() {
        let options = Options {
            capability: ColorCapability::TrueColor,
            ..Options::default()
        };
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "");
        assert_eq!(
            hex("!{hex:bg:#0f0}!".into(), &c).unwrap(),
            "\x1b[48;2;0;255;0m"
        );
        assert!(matches!(
            hex("!{hex:fg:#12}!".into(), &c),
            Err(ConsolError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_code_falls_back_to_source() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "");
        assert_eq!(code("!{code:rust:let x = 1;}!".into(), &c).unwrap(), "let x = 1;");
    }

    #[test]
    fn test_code_uses_highlighter_and_theme() {
        let mut options = Options::default();
        options
            .stringify
            .themes
            .insert("rust".to_string(), "dracula".to_string());
        let hooks = FormatHooks::new();
        let highlighter = |code: &str, language: &str, theme: Option<&str>| -> anyhow::Result<String> {
            Ok(format!("<{language}:{}>{code}", theme.unwrap_or("-")))
        };
        let c = FormatContext {
            highlighter: &highlighter,
            ..ctx(&options, &hooks, "")
        };
        assert_eq!(code("!{code:Rust:x}!".into(), &c).unwrap(), "<rust:dracula>x");
    }

    #[test]
    fn test_steps_are_idempotent() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "a!{message}!");
        let template = "!{date:%Y}! !{level}! !{style:bold}! !{hex:fg:#fff}! !{message}! \
                        !{code:rust:x}! !{hostname}! !{ram:free:bytes}! !{what}!";
        let all: [crate::formatter::Step; 12] = [
            date, message, env, ram, cpu, hostname, uptime, level_rendered, style, hex, code,
            trailing_reset,
        ];
        for step in all {
            let once = step(template.to_string(), &c).unwrap();
            let twice = step(once.clone(), &c).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_trailing_reset_only_once() {
        let options = Options::default();
        let hooks = FormatHooks::new();
        let c = ctx(&options, &hooks, "");
        let once = trailing_reset("x".into(), &c).unwrap();
        assert_eq!(once, "x\x1b[0m");
        assert_eq!(trailing_reset(once.clone(), &c).unwrap(), once);
    }
}
