//! Options state and the level format registry.
//!
//! [`OptionsState`] owns the logger's [`Options`] together with the format
//! hooks and the highlighter used to pre-render level templates. Every
//! mutation that can change a level's terminal form (its template, a style,
//! the color capability, the highlighter or its themes) re-renders the specs
//! before returning, so message formatting only ever reads
//! `FormatSpec::rendered`.
//!
//! Rendering mutations are transactional: the change is applied to a copy,
//! rendered, and committed only if rendering succeeded.

use chrono::Local;
use consol_config::{
    ColorCapability, FormatKind, FormatSpec, FormatsPatch, LevelFilter, LevelFormatsPatch,
    LogLevel, Options, OptionsPatch, RunAt, StringifyPatch, StylesPatch,
};

use crate::color::detect_capability;
use crate::error::Result;
use crate::formatter::{
    FormatContext, FormatHooks, Highlighter, NoHighlighter, Pipeline, SystemMetrics,
};

pub struct OptionsState {
    options: Options,
    hooks: FormatHooks,
    highlighter: Box<dyn Highlighter>,
    level_pipeline: Pipeline,
}

impl OptionsState {
    /// Build state from explicit options, rendering every level spec.
    ///
    /// Fails with `InvalidColor` if any level template holds a bad color.
    pub fn new(options: Options) -> Result<Self> {
        let mut state = Self::unrendered(options);
        let mut options = state.options.clone();
        state.render_all(&mut options)?;
        state.options = options;
        Ok(state)
    }

    fn unrendered(options: Options) -> Self {
        Self {
            options,
            hooks: FormatHooks::new(),
            highlighter: Box::new(NoHighlighter),
            level_pipeline: Pipeline::level(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn hooks(&self) -> &FormatHooks {
        &self.hooks
    }

    pub fn highlighter(&self) -> &dyn Highlighter {
        self.highlighter.as_ref()
    }

    // ── Gating ────────────────────────────────────────────────────────────

    /// Whether a call at `level` is admitted. Pause state is not considered.
    pub fn should_log(&self, level: LogLevel) -> bool {
        self.options.enabled && self.options.level.admits(level)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.options.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.options.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.options.paused
    }

    pub fn set_level(&mut self, level: LevelFilter) {
        self.options.level = level;
    }

    pub fn level(&self) -> LevelFilter {
        self.options.level
    }

    pub fn set_output_to_file(&mut self, output_to_file: bool) {
        self.options.output_to_file = output_to_file;
    }

    pub fn output_to_file(&self) -> bool {
        self.options.output_to_file
    }

    pub fn set_exit_on_fatal(&mut self, exit_on_fatal: bool) {
        self.options.exit_on_fatal = exit_on_fatal;
    }

    pub fn exit_on_fatal(&self) -> bool {
        self.options.exit_on_fatal
    }

    // ── Log and path templates ────────────────────────────────────────────

    pub fn set_format(&mut self, kind: FormatKind, template: impl Into<String>) {
        self.options.formats.set(kind, template);
    }

    pub fn format(&self, kind: FormatKind) -> &str {
        self.options.formats.get(kind)
    }

    pub fn set_formats(&mut self, patch: &FormatsPatch) {
        patch.merge_into(&mut self.options.formats);
    }

    // ── Level formats ─────────────────────────────────────────────────────

    pub fn level_format(&self, level: LogLevel) -> &FormatSpec {
        self.options.level_formats.get(level)
    }

    /// Replace one level's template and re-render it.
    pub fn set_level_format(&mut self, level: LogLevel, template: impl Into<String>) -> Result<()> {
        let raw = template.into();
        let rendered = self.render(&self.options, &raw)?;
        let spec = self.options.level_formats.get_mut(level);
        spec.raw = raw;
        spec.rendered = rendered;
        Ok(())
    }

    pub fn set_level_formats(&mut self, patch: &LevelFormatsPatch) -> Result<()> {
        let mut next = self.options.clone();
        patch.merge_into(&mut next.level_formats);
        for (level, _) in patch.entries() {
            let rendered = self.render(&next, &next.level_formats.get(level).raw)?;
            next.level_formats.get_mut(level).rendered = rendered;
        }
        self.options = next;
        Ok(())
    }

    // ── Styles ────────────────────────────────────────────────────────────

    pub fn style(&self, name: &str) -> Option<&str> {
        self.options.styles.get(name)
    }

    /// Add or replace a named style. Level specs are re-rendered since they
    /// may reference it.
    pub fn set_style(&mut self, name: impl Into<String>, code: impl Into<String>) -> Result<()> {
        let patch = StylesPatch::default().with(name, code);
        self.set_styles(&patch)
    }

    pub fn set_styles(&mut self, patch: &StylesPatch) -> Result<()> {
        self.rerender_with(|options| patch.merge_into(&mut options.styles))
    }

    // ── Color capability and highlighter ──────────────────────────────────

    pub fn capability(&self) -> ColorCapability {
        self.options.capability
    }

    pub fn set_capability(&mut self, capability: ColorCapability) -> Result<()> {
        self.rerender_with(|options| options.capability = capability)
    }

    /// Swap the highlighter used for `code` placeholders.
    pub fn set_highlighter(&mut self, highlighter: Box<dyn Highlighter>) -> Result<()> {
        let previous = std::mem::replace(&mut self.highlighter, highlighter);
        if let Err(e) = self.rerender_with(|_| {}) {
            self.highlighter = previous;
            return Err(e);
        }
        Ok(())
    }

    // ── Stringify ─────────────────────────────────────────────────────────

    /// Merge stringify settings. Theme changes re-render every level.
    pub fn set_stringify(&mut self, patch: &StringifyPatch) -> Result<()> {
        if patch.themes.is_empty() {
            patch.merge_into(&mut self.options.stringify);
            return Ok(());
        }
        self.rerender_with(|options| patch.merge_into(&mut options.stringify))
    }

    pub fn set_stringify_indent(&mut self, indent: usize) {
        self.options.stringify.indent = indent;
    }

    pub fn stringify_indent(&self) -> usize {
        self.options.stringify.indent
    }

    /// Set the highlight theme used for `language`.
    pub fn set_theme(
        &mut self,
        language: impl Into<String>,
        theme: impl Into<String>,
    ) -> Result<()> {
        let (language, theme) = (language.into(), theme.into());
        self.rerender_with(|options| {
            options.stringify.themes.insert(language, theme);
        })
    }

    pub fn theme(&self, language: &str) -> Option<&str> {
        self.options.stringify.theme(language)
    }

    pub fn delete_theme(&mut self, language: &str) -> Result<Option<String>> {
        let mut removed = None;
        self.rerender_with(|options| removed = options.stringify.themes.remove(language))?;
        Ok(removed)
    }

    pub fn clear_themes(&mut self) -> Result<()> {
        self.rerender_with(|options| options.stringify.themes.clear())
    }

    // ── Format hooks ──────────────────────────────────────────────────────

    pub fn register_format_func(
        &mut self,
        id: impl Into<String>,
        run_at: RunAt,
        func: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Result<()> {
        self.hooks.register(id, run_at, Box::new(func))
    }

    pub fn unregister_format_func(&mut self, id: &str) -> Result<()> {
        self.hooks.unregister(id)
    }

    // ── Bulk update ───────────────────────────────────────────────────────

    /// Merge a patch into the current options.
    ///
    /// When the patch can change rendering, every level is re-rendered and
    /// nothing is committed if that fails.
    pub fn apply(&mut self, patch: &OptionsPatch) -> Result<()> {
        if patch.affects_rendering() {
            return self.rerender_with(|options| patch.merge_into(options));
        }
        patch.merge_into(&mut self.options);
        Ok(())
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Render a level template against `options` with the level pipeline.
    fn render(&self, options: &Options, raw: &str) -> Result<String> {
        let ctx = FormatContext {
            level: LogLevel::Log,
            message: "",
            now: Local::now(),
            options,
            hooks: &self.hooks,
            highlighter: self.highlighter.as_ref(),
            metrics: &SystemMetrics,
        };
        self.level_pipeline.run(raw, &ctx)
    }

    fn render_all(&self, options: &mut Options) -> Result<()> {
        for level in LogLevel::all() {
            let rendered = self.render(options, &options.level_formats.get(*level).raw)?;
            options.level_formats.get_mut(*level).rendered = rendered;
        }
        Ok(())
    }

    /// Apply `change` to a copy of the options, re-render every level, commit.
    fn rerender_with(&mut self, change: impl FnOnce(&mut Options)) -> Result<()> {
        let mut next = self.options.clone();
        change(&mut next);
        self.render_all(&mut next)?;
        self.options = next;
        Ok(())
    }
}

impl Default for OptionsState {
    /// Built-in options with the capability detected from the environment.
    fn default() -> Self {
        let options = Options {
            capability: detect_capability(),
            ..Options::default()
        };
        let mut state = Self::unrendered(options);
        let mut options = state.options.clone();
        match state.render_all(&mut options) {
            Ok(()) => state.options = options,
            Err(e) => log::error!("Built-in level formats failed to render: {e}"),
        }
        state
    }
}

impl std::fmt::Debug for OptionsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsState")
            .field("options", &self.options)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
