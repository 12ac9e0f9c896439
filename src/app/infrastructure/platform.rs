//! Host collaborators for file dialogs, file I/O and the unsaved-changes prompt.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;

use crate::app::domain::document::FileData;
use crate::app::infrastructure::error::Result;

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    Save,
    Discard,
    Cancel,
}

pub const UNSAVED_CHANGES_MESSAGE: &str = "변경사항이 저장되지 않았습니다. 저장하시겠습니까?";

pub trait Platform {
    /// Ask for a document to open. `None` when the user cancels.
    fn pick_open_file(&self, directory: Option<&str>) -> Option<String>;

    /// Ask for a save destination. `None` when the user cancels.
    fn pick_save_path(&self, directory: Option<&str>, suggested_name: &str) -> Option<String>;

    fn read_file(&self, path: &str) -> Result<FileData>;

    fn write_file(&self, path: &str, content: &str) -> Result<()>;

    /// Blocks until the user answers.
    fn confirm_unsaved(&self, document_name: &str) -> UnsavedChoice;
}

pub(crate) fn read_utf8(path: &str) -> Result<FileData> {
    let content = fs::read_to_string(path)?;
    Ok(FileData {
        path: path.to_string(),
        content,
    })
}

pub(crate) fn write_utf8(path: &str, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Filesystem platform without a windowing system.
///
/// Dialog answers are queued up front; an empty queue means the user
/// cancelled.
#[derive(Debug, Default)]
pub struct FsPlatform {
    open_paths: RefCell<VecDeque<String>>,
    save_paths: RefCell<VecDeque<String>>,
    unsaved_answers: RefCell<VecDeque<UnsavedChoice>>,
}

impl FsPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_open_path(&self, path: impl Into<String>) {
        self.open_paths.borrow_mut().push_back(path.into());
    }

    pub fn queue_save_path(&self, path: impl Into<String>) {
        self.save_paths.borrow_mut().push_back(path.into());
    }

    pub fn queue_unsaved_answer(&self, choice: UnsavedChoice) {
        self.unsaved_answers.borrow_mut().push_back(choice);
    }
}

impl Platform for FsPlatform {
    fn pick_open_file(&self, _directory: Option<&str>) -> Option<String> {
        self.open_paths.borrow_mut().pop_front()
    }

    fn pick_save_path(&self, _directory: Option<&str>, _suggested_name: &str) -> Option<String> {
        self.save_paths.borrow_mut().pop_front()
    }

    fn read_file(&self, path: &str) -> Result<FileData> {
        read_utf8(path)
    }

    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        write_utf8(path, content)
    }

    fn confirm_unsaved(&self, document_name: &str) -> UnsavedChoice {
        let choice = self
            .unsaved_answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(UnsavedChoice::Cancel);
        tracing::debug!("unsaved changes in {}: {:?}", document_name, choice);
        choice
    }
}
