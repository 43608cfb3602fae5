//! The log engine.
//!
//! [`Consol`] runs one log call end to end: gating, stringify, formatting on
//! the file and terminal channels, file append, console write. It owns the
//! [`OptionsState`], the pause queue and every I/O collaborator as named
//! fields, each replaceable through a `with_*` builder or `set_*` setter.
//!
//! Two orthogonal state axes govern a call:
//!
//! | enabled | paused | call at an admitted level |
//! |---|---|---|
//! | no | any | dropped, never queued |
//! | yes | yes | queued verbatim, replayed by [`Consol::resume`] |
//! | yes | no | formatted and written before returning |

pub mod queue;
pub mod sink;
pub mod stringify;

pub use queue::{PendingLogEntry, PendingQueue};
pub use sink::FileSink;
pub use stringify::{JsonStringify, Stringify};

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use consol_config::{
    ColorCapability, FormatKind, FormatSpec, FormatsPatch, LevelFilter, LevelFormatsPatch,
    LogLevel, Options, OptionsPatch, RunAt, StringifyPatch, StylesPatch,
};
use serde_json::Value;

use crate::error::Result;
use crate::formatter::{FormatContext, Highlighter, HostMetrics, Pipeline, SystemMetrics};
use crate::options::OptionsState;

/// Source of the timestamp used by `date` placeholders.
pub type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Both renderings of one log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    /// ANSI-colored line for the console.
    pub terminal: String,
    /// Plain line and its resolved path, when file output is on.
    pub file: Option<(PathBuf, String)>,
}

pub struct Consol {
    state: OptionsState,
    queue: PendingQueue,
    sink: FileSink,
    console: Box<dyn Write + Send>,
    clock: Clock,
    metrics: Box<dyn HostMetrics>,
    stringify: Box<dyn Stringify>,
    terminal_pipeline: Pipeline,
    file_pipeline: Pipeline,
    path_pipeline: Pipeline,
}

impl Consol {
    /// Logger with built-in options, writing to stdout.
    pub fn new() -> Self {
        Self::from_state(OptionsState::default())
    }

    /// Logger with explicit options. Fails if a level template has a bad color.
    pub fn with_options(options: Options) -> Result<Self> {
        Ok(Self::from_state(OptionsState::new(options)?))
    }

    fn from_state(state: OptionsState) -> Self {
        Self {
            state,
            queue: PendingQueue::new(),
            sink: FileSink::new(),
            console: Box::new(std::io::stdout()),
            clock: Box::new(Local::now),
            metrics: Box::new(SystemMetrics),
            stringify: Box::new(JsonStringify),
            terminal_pipeline: Pipeline::terminal(),
            file_pipeline: Pipeline::file(),
            path_pipeline: Pipeline::path(),
        }
    }

    // ── Collaborators ─────────────────────────────────────────────────────

    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.set_console(console);
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Local> + Send + Sync + 'static) -> Self {
        self.set_clock(clock);
        self
    }

    pub fn with_metrics(mut self, metrics: impl HostMetrics + 'static) -> Self {
        self.set_metrics(metrics);
        self
    }

    pub fn with_stringify(mut self, stringify: impl Stringify + 'static) -> Self {
        self.set_stringify_fn(stringify);
        self
    }

    /// Attach a highlighter. Level formats are re-rendered with it.
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Result<Self> {
        self.set_highlighter(highlighter)?;
        Ok(self)
    }

    pub fn set_console(&mut self, console: impl Write + Send + 'static) {
        self.console = Box::new(console);
    }

    pub fn set_clock(&mut self, clock: impl Fn() -> DateTime<Local> + Send + Sync + 'static) {
        self.clock = Box::new(clock);
    }

    pub fn set_metrics(&mut self, metrics: impl HostMetrics + 'static) {
        self.metrics = Box::new(metrics);
    }

    pub fn set_stringify_fn(&mut self, stringify: impl Stringify + 'static) {
        self.stringify = Box::new(stringify);
    }

    pub fn set_highlighter(&mut self, highlighter: impl Highlighter + 'static) -> Result<()> {
        self.state.set_highlighter(Box::new(highlighter))
    }

    // ── Log calls ─────────────────────────────────────────────────────────

    pub fn log<I, V>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.log_at(LogLevel::Log, args)
    }

    pub fn info<I, V>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.log_at(LogLevel::Info, args)
    }

    pub fn success<I, V>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.log_at(LogLevel::Success, args)
    }

    pub fn warning<I, V>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.log_at(LogLevel::Warning, args)
    }

    pub fn error<I, V>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.log_at(LogLevel::Error, args)
    }

    /// Log at fatal level. Once the line is written the process exits with
    /// status 1 unless `exit_on_fatal` is off.
    pub fn fatal<I, V>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.log_at(LogLevel::Fatal, args)
    }

    pub fn debug<I, V>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.log_at(LogLevel::Debug, args)
    }

    /// Gate, queue or emit one call at `level`.
    pub fn log_at<I, V>(&mut self, level: LogLevel, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        if !self.state.should_log(level) {
            return Ok(());
        }
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        if self.state.is_paused() {
            self.queue.push(level, args);
            return Ok(());
        }
        self.emit(level, &args)
    }

    /// Render a call on both channels without writing anything.
    pub fn format(&self, level: LogLevel, args: &[Value]) -> Result<FormattedLine> {
        let message = self.stringify.stringify(args, &self.state.options().stringify);
        let ctx = FormatContext {
            level,
            message: &message,
            now: (self.clock)(),
            options: self.state.options(),
            hooks: self.state.hooks(),
            highlighter: self.state.highlighter(),
            metrics: self.metrics.as_ref(),
        };
        let template = self.state.format(FormatKind::Log);

        let terminal = self.terminal_pipeline.run(template, &ctx)?;
        let file = if self.state.output_to_file() {
            let path = self
                .path_pipeline
                .run(self.state.format(FormatKind::Path), &ctx)?;
            let line = self.file_pipeline.run(template, &ctx)?;
            Some((PathBuf::from(path), line))
        } else {
            None
        };
        Ok(FormattedLine { terminal, file })
    }

    /// Format and write one admitted call. File first, then console.
    fn emit(&mut self, level: LogLevel, args: &[Value]) -> Result<()> {
        let line = self.format(level, args)?;

        let file_result = match &line.file {
            Some((path, plain)) => self.sink.append(path, plain),
            None => Ok(()),
        };

        if let Err(e) = writeln!(self.console, "{}", line.terminal).and_then(|()| self.console.flush()) {
            log::warn!("Failed to write log line to console: {e}");
        }

        if level == LogLevel::Fatal && self.state.exit_on_fatal() {
            if let Err(e) = &file_result {
                log::error!("Fatal log line was not written to file: {e}");
            }
            std::process::exit(1);
        }
        file_result
    }

    // ── State machine ─────────────────────────────────────────────────────

    pub fn enable(&mut self) {
        self.state.set_enabled(true);
    }

    /// Drop every later call. Queued entries stay queued.
    pub fn disable(&mut self) {
        self.state.set_enabled(false);
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    pub fn pause(&mut self) {
        self.state.set_paused(true);
    }

    /// Leave the paused state and replay the queue in FIFO order.
    ///
    /// Each entry is gated again at replay. Every entry is replayed even if
    /// one fails; the first error is returned.
    pub fn resume(&mut self) -> Result<()> {
        self.state.set_paused(false);
        let pending = self.queue.drain();
        if !pending.is_empty() {
            log::debug!("Replaying {} queued log entries", pending.len());
        }

        let mut first_error = None;
        for entry in pending {
            if !self.state.should_log(entry.level) {
                continue;
            }
            if let Err(e) = self.emit(entry.level, &entry.args) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingLogEntry> {
        self.queue.iter()
    }

    /// Drop queued entries without replaying them.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        self.state.should_log(level)
    }

    // ── Configuration ─────────────────────────────────────────────────────

    pub fn state(&self) -> &OptionsState {
        &self.state
    }

    pub fn options(&self) -> &Options {
        self.state.options()
    }

    pub fn set(&mut self, patch: &OptionsPatch) -> Result<()> {
        let was_paused = self.state.is_paused();
        self.state.apply(patch)?;
        // Unpausing through a patch goes through the same replay as resume().
        if was_paused && !self.state.is_paused() {
            return self.resume();
        }
        Ok(())
    }

    pub fn set_level(&mut self, level: impl Into<LevelFilter>) {
        self.state.set_level(level.into());
    }

    pub fn level(&self) -> LevelFilter {
        self.state.level()
    }

    pub fn set_output_to_file(&mut self, output_to_file: bool) {
        self.state.set_output_to_file(output_to_file);
        if !output_to_file {
            self.sink.close();
        }
    }

    pub fn set_exit_on_fatal(&mut self, exit_on_fatal: bool) {
        self.state.set_exit_on_fatal(exit_on_fatal);
    }

    pub fn set_format(&mut self, kind: FormatKind, template: impl Into<String>) {
        self.state.set_format(kind, template);
    }

    pub fn set_log_format(&mut self, template: impl Into<String>) {
        self.state.set_format(FormatKind::Log, template);
    }

    pub fn set_path_format(&mut self, template: impl Into<String>) {
        self.state.set_format(FormatKind::Path, template);
    }

    pub fn set_formats(&mut self, patch: &FormatsPatch) {
        self.state.set_formats(patch);
    }

    pub fn format_template(&self, kind: FormatKind) -> &str {
        self.state.format(kind)
    }

    pub fn set_level_format(&mut self, level: LogLevel, template: impl Into<String>) -> Result<()> {
        self.state.set_level_format(level, template)
    }

    pub fn set_level_formats(&mut self, patch: &LevelFormatsPatch) -> Result<()> {
        self.state.set_level_formats(patch)
    }

    pub fn level_format(&self, level: LogLevel) -> &FormatSpec {
        self.state.level_format(level)
    }

    pub fn set_style(&mut self, name: impl Into<String>, code: impl Into<String>) -> Result<()> {
        self.state.set_style(name, code)
    }

    pub fn set_styles(&mut self, patch: &StylesPatch) -> Result<()> {
        self.state.set_styles(patch)
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.state.style(name)
    }

    pub fn set_capability(&mut self, capability: ColorCapability) -> Result<()> {
        self.state.set_capability(capability)
    }

    pub fn capability(&self) -> ColorCapability {
        self.state.capability()
    }

    pub fn set_stringify(&mut self, patch: &StringifyPatch) -> Result<()> {
        self.state.set_stringify(patch)
    }

    pub fn set_stringify_indent(&mut self, indent: usize) {
        self.state.set_stringify_indent(indent);
    }

    pub fn set_theme(
        &mut self,
        language: impl Into<String>,
        theme: impl Into<String>,
    ) -> Result<()> {
        self.state.set_theme(language, theme)
    }

    pub fn get_theme(&self, language: &str) -> Option<&str> {
        self.state.theme(language)
    }

    pub fn delete_theme(&mut self, language: &str) -> Result<Option<String>> {
        self.state.delete_theme(language)
    }

    pub fn clear_themes(&mut self) -> Result<()> {
        self.state.clear_themes()
    }

    pub fn register_format_func(
        &mut self,
        id: impl Into<String>,
        run_at: RunAt,
        func: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Result<()> {
        self.state.register_format_func(id, run_at, func)
    }

    pub fn unregister_format_func(&mut self, id: &str) -> Result<()> {
        self.state.unregister_format_func(id)
    }
}

impl Default for Consol {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Consol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consol")
            .field("state", &self.state)
            .field("queue", &self.queue)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}
