use crate::app::infrastructure::error::Result;

/// Kind of the block at the start of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    PageBreak,
    Other(String),
}

/// First block of the document, as reported by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    pub kind: BlockKind,
    pub text: String,
}

/// Markdown codec built into the editor, when it has one.
pub trait NativeMarkdown {
    /// Markdown to editor markup.
    fn parse(&self, markdown: &str) -> Result<String>;
    /// Current editor content as Markdown.
    fn markdown(&self) -> Result<String>;
}

/// The rich-text editing surface.
///
/// Markup is the editor's serialized block tree as HTML; page breaks are
/// `<hr class="page-break-node">` nodes.
pub trait EditorSurface {
    fn markup(&self) -> String;

    fn plain_text(&self) -> String;

    fn set_content(&mut self, markup: &str);

    fn clear_content(&mut self);

    /// Insert a page break at the cursor.
    fn insert_page_break(&mut self);

    /// Insert markup before the first block.
    fn insert_at_start(&mut self, markup: &str);

    fn first_block(&self) -> Option<BlockInfo>;

    fn native_markdown(&self) -> Option<&dyn NativeMarkdown> {
        None
    }
}
