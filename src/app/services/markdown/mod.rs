//! Markdown <-> editor markup conversion with graceful degradation.
//!
//! Converters are tried as an ordered chain. When one is unavailable or
//! fails, the chain moves to the next tier and stays there for the rest of
//! the editing session. The last tier never fails, so loading and saving
//! always produce something, with reduced fidelity at worst.

pub mod html_to_markdown;

use pulldown_cmark::{Options, Parser, html};

use crate::app::domain::editor::EditorSurface;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::text_ops::escape_html;

pub use html_to_markdown::html_to_markdown;

/// One conversion tier.
pub trait MarkdownStrategy {
    fn name(&self) -> &'static str;

    fn is_available(&self, editor: &dyn EditorSurface) -> bool;

    /// Markdown to editor markup.
    fn to_html(&self, editor: &dyn EditorSurface, markdown: &str) -> Result<String>;

    /// Current editor content as Markdown.
    fn to_markdown(&self, editor: &dyn EditorSurface) -> Result<String>;
}

/// The editor's own codec.
pub struct EditorNative;

impl MarkdownStrategy for EditorNative {
    fn name(&self) -> &'static str {
        "editor"
    }

    fn is_available(&self, editor: &dyn EditorSurface) -> bool {
        editor.native_markdown().is_some()
    }

    fn to_html(&self, editor: &dyn EditorSurface, markdown: &str) -> Result<String> {
        editor
            .native_markdown()
            .ok_or_else(|| AppError::Conversion("editor has no Markdown parser".to_string()))?
            .parse(markdown)
    }

    fn to_markdown(&self, editor: &dyn EditorSurface) -> Result<String> {
        editor
            .native_markdown()
            .ok_or_else(|| AppError::Conversion("editor has no Markdown serializer".to_string()))?
            .markdown()
    }
}

/// pulldown-cmark for parsing, the HTML walker for serializing.
pub struct CommonMark;

impl MarkdownStrategy for CommonMark {
    fn name(&self) -> &'static str {
        "commonmark"
    }

    fn is_available(&self, _editor: &dyn EditorSurface) -> bool {
        true
    }

    fn to_html(&self, _editor: &dyn EditorSurface, markdown: &str) -> Result<String> {
        Ok(render_markdown(markdown))
    }

    fn to_markdown(&self, editor: &dyn EditorSurface) -> Result<String> {
        Ok(html_to_markdown(&editor.markup()))
    }
}

/// Last resort: one paragraph per line in, plain text out.
pub struct PlainText;

impl MarkdownStrategy for PlainText {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn is_available(&self, _editor: &dyn EditorSurface) -> bool {
        true
    }

    fn to_html(&self, _editor: &dyn EditorSurface, markdown: &str) -> Result<String> {
        Ok(plain_paragraphs(markdown))
    }

    fn to_markdown(&self, editor: &dyn EditorSurface) -> Result<String> {
        Ok(editor.plain_text())
    }
}

/// Render Markdown to HTML with tables and strikethrough enabled.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

fn plain_paragraphs(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("<p>{}</p>", escape_html(line.trim_end_matches('\r'))))
        .collect()
}

/// Converter selection for one editing session.
pub struct ConverterChain {
    strategies: Vec<Box<dyn MarkdownStrategy>>,
    active: usize,
}

impl Default for ConverterChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(EditorNative),
            Box::new(CommonMark),
            Box::new(PlainText),
        ])
    }
}

impl ConverterChain {
    pub fn new(strategies: Vec<Box<dyn MarkdownStrategy>>) -> Self {
        Self {
            strategies,
            active: 0,
        }
    }

    /// Pick the first available tier for `editor` and log the choice.
    pub fn select(&mut self, editor: &dyn EditorSurface) -> &'static str {
        self.skip_unavailable(editor);
        let name = self.active_name();
        if self.active == 0 {
            tracing::info!("Markdown conversion: primary path ({})", name);
        } else {
            tracing::warn!("Markdown conversion: fallback path ({})", name);
        }
        name
    }

    pub fn active_name(&self) -> &'static str {
        self.strategies
            .get(self.active)
            .map(|s| s.name())
            .unwrap_or("none")
    }

    pub fn is_degraded(&self) -> bool {
        self.active > 0
    }

    pub fn markdown_to_html(&mut self, editor: &dyn EditorSurface, markdown: &str) -> String {
        self.run(editor, "parse", |strategy| strategy.to_html(editor, markdown))
            .unwrap_or_else(|| plain_paragraphs(markdown))
    }

    pub fn editor_markdown(&mut self, editor: &dyn EditorSurface) -> String {
        self.run(editor, "serialize", |strategy| strategy.to_markdown(editor))
            .unwrap_or_else(|| editor.plain_text())
    }

    fn skip_unavailable(&mut self, editor: &dyn EditorSurface) {
        while let Some(strategy) = self.strategies.get(self.active) {
            if strategy.is_available(editor) {
                break;
            }
            tracing::warn!("{} converter unavailable, falling back", strategy.name());
            self.active += 1;
        }
    }

    fn run<F>(&mut self, editor: &dyn EditorSurface, what: &str, op: F) -> Option<String>
    where
        F: Fn(&dyn MarkdownStrategy) -> Result<String>,
    {
        loop {
            self.skip_unavailable(editor);
            let strategy = self.strategies.get(self.active)?;
            match op(strategy.as_ref()) {
                Ok(out) => return Some(out),
                Err(e) => {
                    tracing::warn!("{} {} failed, falling back: {}", strategy.name(), what, e);
                    self.active += 1;
                }
            }
        }
    }
}
