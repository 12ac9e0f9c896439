use super::print_settings::PrintSettings;
use crate::app::services::text_ops::extract_filename;

/// Display name of a document that has never been saved.
pub const DEFAULT_FILE_NAME: &str = "새 문서";

/// A file picked by the user together with its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub path: String,
    pub content: String,
}

/// Persistent identity of the single open document.
///
/// `saved_content` is the exact text last read from or written to disk;
/// `is_dirty` is the only source of truth for unsaved changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    pub file_path: Option<String>,
    pub saved_content: String,
    pub is_dirty: bool,
    pub file_name: String,
    pub print_settings: PrintSettings,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new_untitled()
    }
}

impl DocumentState {
    pub fn new_untitled() -> Self {
        Self {
            file_path: None,
            saved_content: String::new(),
            is_dirty: false,
            file_name: DEFAULT_FILE_NAME.to_string(),
            print_settings: PrintSettings::default(),
        }
    }

    pub fn new_from_file(file: &FileData, print_settings: PrintSettings) -> Self {
        Self {
            file_path: Some(file.path.clone()),
            saved_content: file.content.clone(),
            is_dirty: false,
            file_name: display_name_for(&file.path),
            print_settings,
        }
    }

    pub fn is_untitled(&self) -> bool {
        self.file_path.is_none()
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    /// Record a successful write of `content`, optionally to a new path.
    pub fn mark_saved(&mut self, content: String, path: Option<String>) {
        if let Some(path) = path {
            self.file_name = display_name_for(&path);
            self.file_path = Some(path);
        }
        self.saved_content = content;
        self.is_dirty = false;
    }

    pub fn set_print_settings(&mut self, settings: PrintSettings) {
        self.print_settings = settings;
        self.is_dirty = true;
    }
}

fn display_name_for(path: &str) -> String {
    match extract_filename(path) {
        name if name == "Unknown" => DEFAULT_FILE_NAME.to_string(),
        name => name,
    }
}
