//! Template formatter.
//!
//! A format string is expanded by an ordered [`Pipeline`] of steps. Each
//! step scans the buffer for one placeholder grammar and replaces the
//! matches; a step that finds nothing returns the buffer untouched. Steps
//! are plain functions of `(buffer, context)`, so channels are just
//! different orderings of the same steps:
//!
//! - terminal: hooks, date, message, env, system tags, pre-rendered level,
//!   style, hex, code, hooks, trailing reset
//! - file: hooks, date, message, env, system tags, raw level, plain code,
//!   hooks, strip
//! - level pre-render: hex, style, code
//! - path: date, env, strip
//!
//! ## Supported Placeholders
//!
//! - `!{date:FORMAT}!` - Current time with strftime format
//! - `!{level}!` - The level's format spec
//! - `!{message}!` - The stringified log arguments
//! - `!{style:NAME}!` - A named style escape code
//! - `!{hex:fg:HEX}!` / `!{hex:bg:HEX}!` - A color for the terminal's capability
//! - `!{env:NAME}!` - An environment variable, empty when unset
//! - `!{code:LANG:CODE}!` - Highlighted code
//! - `!{ram:free|used|total:percent|bytes}!`, `!{cpu:name|cores|speed}!`,
//!   `!{hostname}!`, `!{username}!`, `!{uptime:FORMAT}!` - Host metrics
//!
//! Unknown or malformed placeholders are left as text on the terminal
//! channel and removed on the file channel. A malformed color inside a
//! `hex` placeholder is an error.

pub mod highlight;
pub mod hooks;
pub mod metrics;
pub mod patterns;
pub mod steps;

pub use highlight::{Highlighter, NoHighlighter};
pub use hooks::{FormatHooks, HookFn};
pub use metrics::{CpuInfo, HostMetrics, MemoryInfo, SystemMetrics};

use chrono::{DateTime, Local};
use consol_config::{LogLevel, Options};

use crate::error::Result;

/// Everything a step may read while expanding placeholders.
pub struct FormatContext<'a> {
    /// Level of the log call being formatted
    pub level: LogLevel,
    /// Stringified arguments of the log call
    pub message: &'a str,
    /// Timestamp used by `date` placeholders
    pub now: DateTime<Local>,
    pub options: &'a Options,
    pub hooks: &'a FormatHooks,
    pub highlighter: &'a dyn Highlighter,
    pub metrics: &'a dyn HostMetrics,
}

/// One transform over the buffer.
pub type Step = for<'a, 'b> fn(String, &'a FormatContext<'b>) -> Result<String>;

/// An ordered list of named steps.
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<(&'static str, Step)>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn then(mut self, name: &'static str, step: Step) -> Self {
        self.steps.push((name, step));
        self
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|(name, _)| *name).collect()
    }

    /// Seed a buffer with `template` and run every step over it.
    pub fn run(&self, template: &str, ctx: &FormatContext<'_>) -> Result<String> {
        self.steps
            .iter()
            .try_fold(template.to_string(), |buffer, (_, step)| step(buffer, ctx))
    }

    /// Placeholder steps shared by both output channels, up to the level.
    fn resolve_common() -> Self {
        Self::new()
            .then("hooks_before", steps::hooks_before)
            .then("date", steps::date)
            .then("message", steps::message)
            .then("env", steps::env)
            .then("ram", steps::ram)
            .then("cpu", steps::cpu)
            .then("hostname", steps::hostname)
            .then("username", steps::username)
            .then("uptime", steps::uptime)
    }

    /// Terminal channel: color codes wrap text that is already resolved.
    pub fn terminal() -> Self {
        Self::resolve_common()
            .then("level", steps::level_rendered)
            .then("style", steps::style)
            .then("hex", steps::hex)
            .then("code", steps::code)
            .then("hooks_after", steps::hooks_after)
            .then("reset", steps::trailing_reset)
    }

    /// File channel: plain text with no escape bytes or placeholder syntax.
    pub fn file() -> Self {
        Self::resolve_common()
            .then("level", steps::level_raw)
            .then("code", steps::code_plain)
            .then("hooks_after", steps::hooks_after)
            .then("strip", steps::strip)
    }

    /// Configuration-time rendering of a level template.
    pub fn level() -> Self {
        Self::new()
            .then("hex", steps::hex)
            .then("style", steps::style)
            .then("code", steps::code)
    }

    /// Log file path resolution.
    pub fn path() -> Self {
        Self::new()
            .then("date", steps::date)
            .then("env", steps::env)
            .then("strip", steps::strip)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.step_names()).finish()
    }
}

/// Remove every placeholder and escape sequence.
///
/// Runs to a fixpoint, since removing one match can splice its neighbours
/// into a new one. Delimiters left without a partner are dropped last.
/// `strip(strip(x)) == strip(x)` for every input.
pub fn strip(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let without_templates = patterns::ANY_TEMPLATE.replace_all(&current, "");
        let next = patterns::ANSI.replace_all(&without_templates, "").into_owned();
        if next != current {
            current = next;
            continue;
        }
        let next = patterns::STRAY_DELIMITER.replace_all(&current, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}
