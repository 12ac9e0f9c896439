use crate::app::domain::document::FileData;
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::platform::{Platform, UnsavedChoice, read_utf8, write_utf8};
use crate::ui::{dialogs, file_dialogs};

/// Desktop platform: native file choosers and message boxes.
#[derive(Debug, Default)]
pub struct FltkPlatform;

impl Platform for FltkPlatform {
    fn pick_open_file(&self, directory: Option<&str>) -> Option<String> {
        file_dialogs::native_open_dialog(directory)
    }

    fn pick_save_path(&self, directory: Option<&str>, suggested_name: &str) -> Option<String> {
        file_dialogs::native_save_dialog(directory, suggested_name)
    }

    fn read_file(&self, path: &str) -> Result<FileData> {
        read_utf8(path).inspect_err(|e| dialogs::alert_error("파일을 열 수 없습니다", e))
    }

    fn write_file(&self, path: &str, content: &str) -> Result<()> {
        write_utf8(path, content).inspect_err(|e| dialogs::alert_error("파일을 저장할 수 없습니다", e))
    }

    fn confirm_unsaved(&self, document_name: &str) -> UnsavedChoice {
        dialogs::confirm_unsaved(document_name)
    }
}
