//! Syntax highlighting collaborator used by the `code` placeholder.

/// Highlights a code snippet for terminal display.
///
/// Failures are never surfaced to the log caller: the `code` placeholder
/// falls back to the unhighlighted code text.
pub trait Highlighter: Send + Sync {
    /// Whether `language` is known. Unknown languages skip highlighting.
    fn supports(&self, _language: &str) -> bool {
        true
    }

    /// Highlight `code` as `language`, optionally with a named theme.
    fn highlight(&self, code: &str, language: &str, theme: Option<&str>) -> anyhow::Result<String>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, &str, Option<&str>) -> anyhow::Result<String> + Send + Sync,
{
    fn highlight(&self, code: &str, language: &str, theme: Option<&str>) -> anyhow::Result<String> {
        self(code, language, theme)
    }
}

/// Default highlighter: knows no languages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlighter;

impl Highlighter for NoHighlighter {
    fn supports(&self, _language: &str) -> bool {
        false
    }

    fn highlight(&self, _code: &str, language: &str, _theme: Option<&str>) -> anyhow::Result<String> {
        anyhow::bail!("no highlighter configured for {language}")
    }
}
