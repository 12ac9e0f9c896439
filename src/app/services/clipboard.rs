//! Clipboard tagging so pastes can tell editor content from outside text.

use crate::app::domain::editor::EditorSurface;
use crate::app::infrastructure::error::Result;
use crate::app::services::markdown::ConverterChain;

pub const INTERNAL_MIME: &str = "application/x-hangeulmd";

/// Writable clipboard of a copy/cut event.
pub trait ClipboardSink {
    fn set_data(&mut self, mime: &str, data: &str) -> Result<()>;
}

/// Readable clipboard of a paste event.
pub trait ClipboardSource {
    fn get_data(&self, mime: &str) -> Option<String>;
}

/// Tag a copy or cut as coming from this editor. Platforms may refuse
/// custom types; that only costs the paste optimization.
pub fn tag_copy(sink: &mut dyn ClipboardSink) {
    if let Err(e) = sink.set_data(INTERNAL_MIME, "1") {
        tracing::debug!("clipboard tag not written: {}", e);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PastePlan {
    /// Internal content: let the editor paste its own markup.
    EditorDefault,
    /// Outside text, read as Markdown and inserted as markup.
    InsertMarkup(String),
    Nothing,
}

pub fn plan_paste(
    source: &dyn ClipboardSource,
    chain: &mut ConverterChain,
    editor: &dyn EditorSurface,
) -> PastePlan {
    if source.get_data(INTERNAL_MIME).is_some_and(|v| !v.is_empty()) {
        return PastePlan::EditorDefault;
    }
    match source.get_data("text/plain") {
        Some(text) if !text.is_empty() => {
            PastePlan::InsertMarkup(chain.markdown_to_html(editor, &text))
        }
        _ => PastePlan::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::editor::MarkupEditor;
    use crate::app::infrastructure::error::AppError;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Clipboard {
        data: HashMap<String, String>,
        refuse_custom: bool,
    }

    impl ClipboardSink for Clipboard {
        fn set_data(&mut self, mime: &str, data: &str) -> Result<()> {
            if self.refuse_custom && mime.starts_with("application/") {
                return Err(AppError::Io(std::io::Error::other("type not allowed")));
            }
            self.data.insert(mime.to_string(), data.to_string());
            Ok(())
        }
    }

    impl ClipboardSource for Clipboard {
        fn get_data(&self, mime: &str) -> Option<String> {
            self.data.get(mime).cloned()
        }
    }

    #[test]
    fn test_tagged_copy_pastes_natively() {
        let mut clipboard = Clipboard::default();
        tag_copy(&mut clipboard);
        clipboard.data.insert("text/plain".into(), "**x**".into());
        let mut chain = ConverterChain::default();
        let plan = plan_paste(&clipboard, &mut chain, &MarkupEditor::new());
        assert_eq!(plan, PastePlan::EditorDefault);
    }

    #[test]
    fn test_refused_tag_is_ignored() {
        let mut clipboard = Clipboard { refuse_custom: true, ..Default::default() };
        tag_copy(&mut clipboard);
        assert!(clipboard.data.is_empty());
    }

    #[test]
    fn test_outside_text_is_converted() {
        let mut clipboard = Clipboard::default();
        clipboard.data.insert("text/plain".into(), "**x**".into());
        let mut chain = ConverterChain::default();
        let plan = plan_paste(&clipboard, &mut chain, &MarkupEditor::new());
        assert_eq!(plan, PastePlan::InsertMarkup("<p><strong>x</strong></p>\n".into()));
    }

    #[test]
    fn test_empty_clipboard() {
        let clipboard = Clipboard::default();
        let mut chain = ConverterChain::default();
        assert_eq!(
            plan_paste(&clipboard, &mut chain, &MarkupEditor::new()),
            PastePlan::Nothing
        );
    }
}
