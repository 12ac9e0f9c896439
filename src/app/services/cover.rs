use crate::app::domain::editor::{BlockInfo, BlockKind, EditorSurface};
use crate::app::infrastructure::editor::page_break_markup;

pub const COVER_TITLE_PLACEHOLDER: &str = "제목을 입력하세요";
pub const COVER_AUTHOR_PLACEHOLDER: &str = "작성자: 이름을 입력하세요";
const TITLE_WORD: &str = "제목";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverInsert {
    Inserted,
    AlreadyPresent,
}

/// A cover is present when the document opens with a level-1 heading that
/// still mentions the title placeholder.
pub fn has_cover(first: Option<&BlockInfo>) -> bool {
    matches!(
        first,
        Some(BlockInfo { kind: BlockKind::Heading(1), text })
            if text == COVER_TITLE_PLACEHOLDER || text.contains(TITLE_WORD)
    )
}

pub fn cover_markup() -> String {
    format!(
        "<h1>{}</h1><p>{}</p>{}",
        COVER_TITLE_PLACEHOLDER,
        COVER_AUTHOR_PLACEHOLDER,
        page_break_markup()
    )
}

/// Put a cover page (title, author line, page break) before the content.
pub fn insert_cover(editor: &mut dyn EditorSurface) -> CoverInsert {
    if has_cover(editor.first_block().as_ref()) {
        return CoverInsert::AlreadyPresent;
    }
    editor.insert_at_start(&cover_markup());
    CoverInsert::Inserted
}
