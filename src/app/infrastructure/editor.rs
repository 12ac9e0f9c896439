use crate::app::domain::editor::{BlockInfo, BlockKind, EditorSurface};
use crate::app::infrastructure::html_tree::{HtmlTree, PAGE_BREAK_CLASS, is_page_break_node};

/// Markup for one page-break node as the editor renders it.
pub fn page_break_markup() -> String {
    format!("<hr class=\"{}\">", PAGE_BREAK_CLASS)
}

/// Headless editor surface holding serialized markup.
///
/// The cursor is always at the end of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupEditor {
    html: String,
}

impl MarkupEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markup(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl EditorSurface for MarkupEditor {
    fn markup(&self) -> String {
        self.html.clone()
    }

    fn plain_text(&self) -> String {
        let tree = HtmlTree::parse(&self.html);
        tree.body()
            .children()
            .map(|block| block.text_contents().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn set_content(&mut self, markup: &str) {
        self.html = markup.to_string();
    }

    fn clear_content(&mut self) {
        self.html.clear();
    }

    fn insert_page_break(&mut self) {
        // A paragraph follows the break so typing continues on the new page.
        self.html.push_str(&page_break_markup());
        self.html.push_str("<p></p>");
    }

    fn insert_at_start(&mut self, markup: &str) {
        self.html.insert_str(0, markup);
    }

    fn first_block(&self) -> Option<BlockInfo> {
        let tree = HtmlTree::parse(&self.html);
        let first = tree.body().children().find(|n| n.as_element().is_some())?;
        let tag = first
            .as_element()
            .map(|el| el.name.local.as_ref().to_ascii_lowercase())
            .unwrap_or_default();
        let kind = if is_page_break_node(&first) {
            BlockKind::PageBreak
        } else {
            match tag.as_str() {
                "h1" => BlockKind::Heading(1),
                "h2" => BlockKind::Heading(2),
                "h3" => BlockKind::Heading(3),
                "h4" => BlockKind::Heading(4),
                "h5" => BlockKind::Heading(5),
                "h6" => BlockKind::Heading(6),
                "p" => BlockKind::Paragraph,
                _ => BlockKind::Other(tag),
            }
        };
        Some(BlockInfo {
            kind,
            text: first.text_contents(),
        })
    }
}
