//! The single open document: lifecycle, persistence and editor commands.

use crate::app::controllers::print::{self, PrintOutcome, PrintSurface};
use crate::app::domain::document::{DEFAULT_FILE_NAME, DocumentState};
use crate::app::domain::editor::EditorSurface;
use crate::app::domain::print_settings::PrintSettings;
use crate::app::domain::settings::AppSettings;
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::platform::{Platform, UnsavedChoice};
use crate::app::services::clipboard::{self, ClipboardSink, ClipboardSource, PastePlan};
use crate::app::services::cover::{self, CoverInsert};
use crate::app::services::front_matter;
use crate::app::services::markdown::ConverterChain;

pub const APP_NAME: &str = "한글MD";

pub struct DocumentController<E: EditorSurface, P: Platform> {
    state: DocumentState,
    chain: ConverterChain,
    editor: E,
    platform: P,
    settings: AppSettings,
}

impl<E: EditorSurface, P: Platform> DocumentController<E, P> {
    pub fn new(editor: E, platform: P, settings: AppSettings) -> Self {
        let mut chain = ConverterChain::default();
        chain.select(&editor);
        Self {
            state: DocumentState::new_untitled(),
            chain,
            editor,
            platform,
            settings,
        }
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn converter(&self) -> &ConverterChain {
        &self.chain
    }

    /// Editor update event.
    pub fn content_changed(&mut self) {
        self.state.mark_dirty();
    }

    pub fn set_print_settings(&mut self, settings: PrintSettings) {
        self.state.set_print_settings(settings);
    }

    /// Closing without a prompt is only allowed when nothing is unsaved.
    pub fn can_close(&self) -> bool {
        !self.state.is_dirty
    }

    pub fn window_title(&self) -> String {
        let marker = if self.state.is_dirty { "*" } else { "" };
        format!("{}{} - {}", marker, self.state.file_name, APP_NAME)
    }

    pub fn new_document(&mut self) -> bool {
        if !self.resolve_unsaved() {
            return false;
        }
        self.editor.clear_content();
        self.state = DocumentState::new_untitled();
        tracing::info!("New document");
        true
    }

    /// Ask for a file and open it.
    pub fn open(&mut self) -> bool {
        if !self.resolve_unsaved() {
            return false;
        }
        let dir = self.settings.last_open_directory.clone();
        match self.platform.pick_open_file(dir.as_deref()) {
            Some(path) => self.load(&path),
            None => false,
        }
    }

    /// Open `path` directly, still guarding unsaved changes.
    pub fn open_path(&mut self, path: &str) -> bool {
        if !self.resolve_unsaved() {
            return false;
        }
        self.load(path)
    }

    fn load(&mut self, path: &str) -> bool {
        let file = match self.platform.read_file(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("Error opening file {}: {}", path, e);
                return false;
            }
        };

        let parsed = front_matter::parse(&file.content);
        let markup = self.chain.markdown_to_html(&self.editor, &parsed.body);
        self.editor.set_content(&markup);
        self.state = DocumentState::new_from_file(&file, parsed.settings);
        self.settings.remember_directory(path);
        tracing::info!("Opened {}", path);
        true
    }

    /// Serialized file text: preamble (when needed) and Markdown body.
    pub fn current_content(&mut self) -> Result<String> {
        let body = self.chain.editor_markdown(&self.editor);
        front_matter::serialize(&body, &self.state.print_settings)
    }

    pub fn save(&mut self) -> bool {
        match self.state.file_path.clone() {
            Some(path) => self.write_to(&path, false),
            None => self.save_as(),
        }
    }

    pub fn save_as(&mut self) -> bool {
        let suggested = if self.state.is_untitled() {
            format!("{}.md", DEFAULT_FILE_NAME)
        } else {
            self.state.file_name.clone()
        };
        let dir = self.settings.last_open_directory.clone();
        match self.platform.pick_save_path(dir.as_deref(), &suggested) {
            Some(path) => self.write_to(&path, true),
            None => false,
        }
    }

    /// State is only touched once the write has succeeded.
    fn write_to(&mut self, path: &str, rename: bool) -> bool {
        let content = match self.current_content() {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Error serializing document: {}", e);
                return false;
            }
        };
        if let Err(e) = self.platform.write_file(path, &content) {
            tracing::error!("Error saving file {}: {}", path, e);
            return false;
        }
        let new_path = rename.then(|| path.to_string());
        self.state.mark_saved(content, new_path);
        self.settings.remember_directory(path);
        tracing::info!("Saved {}", path);
        true
    }

    /// Returns true when the pending operation may continue.
    fn resolve_unsaved(&mut self) -> bool {
        if !self.state.is_dirty {
            return true;
        }
        match self.platform.confirm_unsaved(&self.state.file_name) {
            UnsavedChoice::Save => self.save(),
            UnsavedChoice::Discard => true,
            UnsavedChoice::Cancel => false,
        }
    }

    pub fn print(&mut self, surface: &mut dyn PrintSurface) -> Result<PrintOutcome> {
        print::print(&self.editor.markup(), &self.state.print_settings, surface)
    }

    pub fn insert_page_break(&mut self) {
        self.editor.insert_page_break();
        self.content_changed();
    }

    pub fn insert_cover(&mut self) -> CoverInsert {
        let result = cover::insert_cover(&mut self.editor);
        if result == CoverInsert::Inserted {
            self.content_changed();
        }
        result
    }

    /// Copy event: tag the clipboard so a later paste keeps editor markup.
    pub fn copy(&self, sink: &mut dyn ClipboardSink) {
        clipboard::tag_copy(sink);
    }

    /// Cut event. The editor removes the selection; this tags the clipboard
    /// and records the edit.
    pub fn cut(&mut self, sink: &mut dyn ClipboardSink) {
        clipboard::tag_copy(sink);
        self.content_changed();
    }

    /// Decide how to handle a paste, inserting converted Markdown if needed.
    pub fn paste(&mut self, source: &dyn ClipboardSource) -> PastePlan {
        let plan = clipboard::plan_paste(source, &mut self.chain, &self.editor);
        if let PastePlan::InsertMarkup(markup) = &plan {
            let mut html = self.editor.markup();
            html.push_str(markup);
            self.editor.set_content(&html);
            self.content_changed();
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::editor::MarkupEditor;
    use crate::app::infrastructure::error::AppError;
    use crate::app::infrastructure::platform::FsPlatform;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    type Controller = DocumentController<MarkupEditor, FsPlatform>;

    fn controller() -> Controller {
        DocumentController::new(MarkupEditor::new(), FsPlatform::new(), AppSettings::default())
    }

    fn write_doc(dir: &TempDir, name: &str, text: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_fresh_document_is_clean() {
        let ctl = controller();
        assert!(!ctl.state().is_dirty);
        assert!(ctl.can_close());
        assert_eq!(ctl.window_title(), "새 문서 - 한글MD");
    }

    #[test]
    fn test_content_change_marks_dirty() {
        let mut ctl = controller();
        ctl.content_changed();
        assert!(ctl.state().is_dirty);
        assert!(!ctl.can_close());
        assert_eq!(ctl.window_title(), "*새 문서 - 한글MD");
    }

    #[test]
    fn test_open_reads_preamble_and_body() {
        let dir = tempdir().unwrap();
        let text = "---\nheader_left: Report\nexclude_first_page: true\n---\n\n# Title\n";
        let path = write_doc(&dir, "report.md", text);
        let mut ctl = controller();

        assert!(ctl.open_path(&path));
        assert_eq!(ctl.state().file_name, "report.md");
        assert_eq!(ctl.state().saved_content, text);
        assert!(!ctl.state().is_dirty);
        assert_eq!(ctl.state().print_settings.header_left, "Report");
        assert!(ctl.state().print_settings.exclude_first_page);
        assert_eq!(ctl.editor().markup(), "<h1>Title</h1>\n");
    }

    #[test]
    fn test_save_round_trips_settings() {
        let dir = tempdir().unwrap();
        let path = write_doc(&dir, "a.md", "# A\n");
        let mut ctl = controller();
        assert!(ctl.open_path(&path));

        let settings = PrintSettings {
            footer_center: "{page} / {pages}".into(),
            ..Default::default()
        };
        ctl.set_print_settings(settings.clone());
        assert!(ctl.state().is_dirty);
        assert!(ctl.save());
        assert!(!ctl.state().is_dirty);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(ctl.state().saved_content, written);
        let parsed = front_matter::parse(&written);
        assert_eq!(parsed.body, "# A\n");
        assert_eq!(parsed.settings, settings);
    }

    #[test]
    fn test_default_settings_save_plain_markdown() {
        let dir = tempdir().unwrap();
        let path = write_doc(&dir, "plain.md", "Just text\n");
        let mut ctl = controller();
        assert!(ctl.open_path(&path));
        ctl.content_changed();
        assert!(ctl.save());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Just text\n");
    }

    #[test]
    fn test_untitled_save_asks_for_path() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("new.md").to_string_lossy().to_string();
        let mut ctl = controller();
        ctl.content_changed();

        assert!(!ctl.save());
        assert!(ctl.state().is_dirty);

        ctl.platform().queue_save_path(target.clone());
        assert!(ctl.save());
        assert_eq!(ctl.state().file_path.as_deref(), Some(target.as_str()));
        assert_eq!(ctl.state().file_name, "new.md");
        assert_eq!(ctl.window_title(), "new.md - 한글MD");
        assert!(ctl.settings().last_open_directory.is_some());
    }

    #[test]
    fn test_failed_save_leaves_state_untouched() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("missing").join("x.md").to_string_lossy().to_string();
        let mut ctl = controller();
        ctl.content_changed();
        let before = ctl.state().clone();

        ctl.platform().queue_save_path(bad);
        assert!(!ctl.save_as());
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn test_failed_open_leaves_state_untouched() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.md").to_string_lossy().to_string();
        let mut ctl = controller();
        ctl.content_changed();
        ctl.platform().queue_unsaved_answer(UnsavedChoice::Discard);
        let before = ctl.state().clone();

        assert!(!ctl.open_path(&missing));
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn test_cancel_aborts_new_document() {
        let mut ctl = controller();
        ctl.insert_page_break();
        ctl.platform().queue_unsaved_answer(UnsavedChoice::Cancel);
        let markup = ctl.editor().markup();

        assert!(!ctl.new_document());
        assert!(ctl.state().is_dirty);
        assert_eq!(ctl.editor().markup(), markup);
    }

    #[test]
    fn test_discard_resets_document() {
        let mut ctl = controller();
        ctl.insert_page_break();
        ctl.platform().queue_unsaved_answer(UnsavedChoice::Discard);

        assert!(ctl.new_document());
        assert!(!ctl.state().is_dirty);
        assert!(ctl.editor().markup().is_empty());
    }

    #[test]
    fn test_save_choice_saves_before_open() {
        let dir = tempdir().unwrap();
        let first = write_doc(&dir, "first.md", "one\n");
        let second = write_doc(&dir, "second.md", "two\n");
        let mut ctl = controller();
        assert!(ctl.open_path(&first));
        ctl.insert_page_break();

        ctl.platform().queue_unsaved_answer(UnsavedChoice::Save);
        ctl.platform().queue_open_path(second);
        assert!(ctl.open());
        assert_eq!(ctl.state().file_name, "second.md");
        assert_eq!(fs::read_to_string(&first).unwrap(), "one\n\n---\n");
    }

    #[test]
    fn test_failed_save_choice_aborts_open() {
        let dir = tempdir().unwrap();
        let second = write_doc(&dir, "second.md", "two\n");
        let mut ctl = controller();
        ctl.content_changed();

        // Untitled, and the save dialog is cancelled.
        ctl.platform().queue_unsaved_answer(UnsavedChoice::Save);
        assert!(!ctl.open_path(&second));
        assert!(ctl.state().is_untitled());
        assert!(ctl.state().is_dirty);
    }

    #[test]
    fn test_insert_cover_once() {
        let mut ctl = controller();
        assert_eq!(ctl.insert_cover(), CoverInsert::Inserted);
        assert!(ctl.state().is_dirty);
        assert_eq!(ctl.insert_cover(), CoverInsert::AlreadyPresent);
    }

    #[derive(Default)]
    struct Board {
        data: Vec<(String, String)>,
        refuse: bool,
    }

    impl ClipboardSink for Board {
        fn set_data(&mut self, mime: &str, data: &str) -> Result<()> {
            if self.refuse {
                return Err(AppError::Io(std::io::Error::other("custom types blocked")));
            }
            self.data.push((mime.to_string(), data.to_string()));
            Ok(())
        }
    }

    impl ClipboardSource for Board {
        fn get_data(&self, mime: &str) -> Option<String> {
            self.data.iter().find(|(m, _)| m == mime).map(|(_, d)| d.clone())
        }
    }

    #[test]
    fn test_copy_tags_clipboard_for_native_paste() {
        let mut ctl = controller();
        let mut board = Board::default();
        ctl.copy(&mut board);
        assert_eq!(board.data, vec![(clipboard::INTERNAL_MIME.to_string(), "1".to_string())]);
        assert!(!ctl.state().is_dirty);

        board.data.push(("text/plain".into(), "*x*".into()));
        assert_eq!(ctl.paste(&board), PastePlan::EditorDefault);
    }

    #[test]
    fn test_refused_tag_does_not_break_copy_or_cut() {
        let mut ctl = controller();
        let mut board = Board { refuse: true, ..Default::default() };
        ctl.copy(&mut board);
        ctl.cut(&mut board);
        assert!(board.data.is_empty());
        assert!(ctl.state().is_dirty);
    }

    #[test]
    fn test_paste_outside_markdown() {
        struct Text;
        impl ClipboardSource for Text {
            fn get_data(&self, mime: &str) -> Option<String> {
                (mime == "text/plain").then(|| "*hi*".to_string())
            }
        }
        let mut ctl = controller();
        let plan = ctl.paste(&Text);
        assert_eq!(plan, PastePlan::InsertMarkup("<p><em>hi</em></p>\n".into()));
        assert!(ctl.editor().markup().contains("<em>hi</em>"));
        assert!(ctl.state().is_dirty);
    }
}
